//! Metrics facade hooks for the recorder.
//!
//! Without an installed recorder these calls are no-ops.

use ::metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

pub const MESSAGES_RECORDED: &str = "panel_messages_recorded_total";
pub const DISPATCH_FAILURES: &str = "panel_dispatch_failures_total";
pub const DUMP_FAILURES: &str = "panel_dump_failures_total";
pub const HANDLING_DURATION: &str = "panel_handling_duration_ms";

/// Register metric descriptions. Safe to call more than once.
pub fn init_metrics() {
    describe_counter!(MESSAGES_RECORDED, "Messages recorded for the panel");
    describe_counter!(
        DISPATCH_FAILURES,
        "Dispatches that failed downstream of the recorder"
    );
    describe_counter!(DUMP_FAILURES, "Dumps replaced by a placeholder");
    describe_histogram!(
        HANDLING_DURATION,
        Unit::Milliseconds,
        "Downstream handling duration of recorded messages"
    );
}

pub fn record_message_recorded(bus: &str, duration_ms: f64) {
    counter!(MESSAGES_RECORDED, "bus" => bus.to_string()).increment(1);
    histogram!(HANDLING_DURATION, "bus" => bus.to_string()).record(duration_ms);
}

pub fn record_dispatch_failure(bus: &str) {
    counter!(DISPATCH_FAILURES, "bus" => bus.to_string()).increment(1);
}

pub fn record_dump_failure(bus: &str) {
    counter!(DUMP_FAILURES, "bus" => bus.to_string()).increment(1);
}
