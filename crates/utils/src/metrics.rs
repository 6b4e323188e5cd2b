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


//! Per-method request metrics shared by the HTTP server and the chain clients.

use std::time::Instant;

use metrics::{Counter, Gauge, Histogram};
use metrics_derive::Metrics;

/// Records one method invocation: count, in-flight gauge, latency and final status
pub struct MethodSessionLogger {
    start_time: Instant,
    service_name: &'static str,
    method_name: String,
    method_metrics: MethodMetrics,
}

#[derive(Metrics)]
#[metrics(scope = "method_stats")]
struct MethodMetrics {
    #[metric(describe = "total count of requests.")]
    num_requests: Counter,

    #[metric(describe = "the number of open requests.")]
    open_requests: Gauge,

    #[metric(describe = "the distribution of request latency in milliseconds.")]
    request_latency: Histogram,
}

#[derive(Metrics)]
#[metrics(scope = "method_stats")]
struct MethodStatusMetrics {
    #[metric(describe = "the count of response statuses.")]
    response_status: Counter,
}

impl MethodSessionLogger {
    /// Start a session, counting the request and marking it open
    pub fn start(service_name: &'static str, method_name: impl Into<String>) -> Self {
        let method_name = method_name.into();
        let method_metrics = MethodMetrics::new_with_labels(&[
            ("service_name", service_name.to_string()),
            ("method_name", method_name.clone()),
        ]);
        method_metrics.num_requests.increment(1);
        method_metrics.open_requests.increment(1);

        Self {
            start_time: Instant::now(),
            service_name,
            method_name,
            method_metrics,
        }
    }

    /// End the session with a status label, recording its latency
    pub fn done(self, status: &str) {
        self.method_metrics.open_requests.decrement(1);
        self.method_metrics
            .request_latency
            .record(self.start_time.elapsed().as_millis() as f64);

        MethodStatusMetrics::new_with_labels(&[
            ("service_name", self.service_name.to_string()),
            ("method_name", self.method_name),
            ("status", status.to_string()),
        ])
        .response_status
        .increment(1);
    }
}
