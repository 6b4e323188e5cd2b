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

//! Logging helpers for results that are passed up unchanged

use std::fmt::Display;

use tracing::Level;

/// Trait for logging an error if there is one on a result
pub trait LogOnError {
    /// Log at the given level if there is an error, preserving the original error type
    fn log_on_error_level<C>(self, level: Level, context: C) -> Self
    where
        C: Display;
}

impl<T, E> LogOnError for Result<T, E>
where
    E: Display,
{
    fn log_on_error_level<C>(self, level: Level, context: C) -> Self
    where
        C: Display,
    {
        if let Err(error) = &self {
            log_at_level(level, &format!("{context}: {error}"));
        }
        self
    }
}

fn log_at_level(level: Level, s: &str) {
    match level {
        Level::TRACE => tracing::trace!("{s}"),
        Level::DEBUG => tracing::debug!("{s}"),
        Level::INFO => tracing::info!("{s}"),
        Level::WARN => tracing::warn!("{s}"),
        Level::ERROR => tracing::error!("{s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_on_error_preserves_result() {
        let ok: Result<u8, String> = Ok(7);
        assert_eq!(ok.log_on_error_level(Level::ERROR, "unused"), Ok(7));

        let err: Result<u8, String> = Err("boom".to_owned());
        assert_eq!(
            err.log_on_error_level(Level::WARN, "estimating"),
            Err("boom".to_owned())
        );
    }
}
