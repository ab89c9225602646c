//! Recording interceptor for message-bus pipelines.
//!
//! [`PanelRecorder`] times the rest of the stack, then appends a
//! [`HandledMessageRecord`] holding the message name, duration and bounded
//! dumps of the payload and every handler result.
//!
//! # Concurrency
//!
//! A recorder may be shared by dispatches running on many threads. Records
//! are appended under a write lock and read as a cloned snapshot; the lazy
//! enablement decision is resolved once under its own lock.

mod enablement;
mod middleware;
mod record;

pub use enablement::Enablement;
pub use middleware::PanelRecorder;
pub use record::HandledMessageRecord;

pub(crate) use record::round_ms;
