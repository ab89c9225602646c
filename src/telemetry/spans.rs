//! The `dispatch` span opened by [`PanelRecorder`](crate::PanelRecorder)
//! around the rest of the middleware stack.
//!
//! The span is created at `DEBUG` level, so it costs nothing unless a
//! subscriber enables `log_to_panel=debug`. Log events emitted by the
//! recorder while recording a message are nested inside it.

use tracing::{debug_span, field, Span};

/// Fills in the fields of a dispatch span once the downstream call returns.
pub trait SpanExt {
    /// Set `outcome` to `handled` or `failed`. On failure, `error` holds the
    /// display form of the bus error.
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display;

    /// Set `elapsed_ms` to the rounded downstream handling time.
    fn record_duration_ms(&self, duration_ms: f64);
}

impl SpanExt for Span {
    fn record_result<T, E>(&self, result: &Result<T, E>)
    where
        E: std::fmt::Display,
    {
        if let Err(e) = result {
            self.record("outcome", "failed");
            self.record("error", field::display(e));
        } else {
            self.record("outcome", "handled");
        }
    }

    fn record_duration_ms(&self, duration_ms: f64) {
        self.record("elapsed_ms", duration_ms);
    }
}

/// Builder for the recorder's `dispatch` span.
pub struct DispatchSpan;

impl DispatchSpan {
    /// Open a span tagged with the bus name and the message's short type
    /// name. `outcome`, `error` and `elapsed_ms` start empty and are filled
    /// through [`SpanExt`].
    pub fn new(bus: &str, message: &str) -> Span {
        debug_span!(
            "dispatch",
            bus,
            message,
            outcome = field::Empty,
            error = field::Empty,
            elapsed_ms = field::Empty,
        )
    }
}
