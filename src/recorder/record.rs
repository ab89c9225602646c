//! Telemetry captured for one handled message.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Immutable record of one successfully handled message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandledMessageRecord {
    name: String,
    duration_ms: f64,
    message_dump: String,
    result_dump: String,
}

impl HandledMessageRecord {
    pub fn new(
        name: impl Into<String>,
        duration_ms: f64,
        message_dump: impl Into<String>,
        result_dump: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration_ms,
            message_dump: message_dump.into(),
            result_dump: result_dump.into(),
        }
    }

    /// Short type name of the message.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Downstream handling time, rounded to three decimals.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn message_dump(&self) -> &str {
        &self.message_dump
    }

    /// Handler result dumps joined by newlines; empty when nothing was handled.
    pub fn result_dump(&self) -> &str {
        &self.result_dump
    }
}

/// Milliseconds rounded to three decimal places.
pub(crate) fn round_ms(ms: f64) -> f64 {
    (ms * 1_000.0).round() / 1_000.0
}

pub(crate) fn duration_ms(elapsed: Duration) -> f64 {
    round_ms(elapsed.as_secs_f64() * 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rounds_to_microseconds() {
        assert_eq!(duration_ms(Duration::from_nanos(1_234_567)), 1.235);
        assert_eq!(duration_ms(Duration::from_nanos(1_234_499)), 1.234);
        assert_eq!(duration_ms(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_round_ms_absorbs_float_noise() {
        assert_eq!(round_ms(0.1 + 0.2), 0.3);
    }
}
