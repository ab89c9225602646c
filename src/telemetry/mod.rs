//! Telemetry for the recorder itself: structured logging, dispatch spans and
//! metrics. All of it is no-op until the host installs a subscriber or a
//! metrics recorder.

mod logging;
mod metrics;
mod spans;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
pub use self::metrics::{
    init_metrics, record_dispatch_failure, record_dump_failure, record_message_recorded,
    DISPATCH_FAILURES, DUMP_FAILURES, HANDLING_DURATION, MESSAGES_RECORDED,
};
pub use spans::{DispatchSpan, SpanExt};
