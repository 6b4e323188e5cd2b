// This file is part of Feestimi.
//
// Feestimi is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Feestimi is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Feestimi.
// If not, see https://www.gnu.org/licenses/.


use std::io;

pub use tracing::*;
use tracing::{subscriber::Interest, Metadata, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

use super::LogsArgs;

const DEFAULT_FILTER: &str = "info";

/// Targets that log every connection or request at debug level
const NOISY_TARGETS: &[&str] = &["h2", "hyper", "reqwest", "alloy_transport_http"];

/// Install the global subscriber.
///
/// Log lines are flushed by a background writer until the returned guard is dropped.
pub fn configure_logging(config: &LogsArgs) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = writer(config.file.as_deref());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = if config.json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer().pretty().with_writer(writer).boxed()
    };

    let subscriber = tracing_subscriber::registry()
        .with(NoisyTargetFilter)
        .with(filter)
        .with(format);
    subscriber::set_global_default(subscriber)?;

    // `log` records from dependencies go through the same subscriber
    LogTracer::init()?;

    Ok(guard)
}

fn writer(file: Option<&str>) -> (NonBlocking, WorkerGuard) {
    match file {
        Some(file) => tracing_appender::non_blocking(tracing_appender::rolling::never(".", file)),
        None => tracing_appender::non_blocking(io::stdout()),
    }
}

fn is_noisy(target: &str) -> bool {
    NOISY_TARGETS.iter().any(|noisy| target.starts_with(noisy))
}

struct NoisyTargetFilter;

impl<S> Layer<S> for NoisyTargetFilter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if is_noisy(metadata.target()) {
            Interest::never()
        } else {
            Interest::always()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noisy_targets() {
        assert!(is_noisy("hyper::proto::h1::conn"));
        assert!(is_noisy("h2::codec"));
        assert!(is_noisy("alloy_transport_http::hyper_transport"));
        assert!(!is_noisy("feestimi_estimator::estimator"));
        assert!(!is_noisy("feestimi_rpc::task"));
    }
}
