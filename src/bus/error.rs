//! Dispatch error types.

use thiserror::Error;

/// Errors surfaced by a middleware stack during dispatch.
///
/// Middleware that only observes the pipeline must return these unchanged.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("Handler {handler} failed: {source}")]
    HandlerFailed {
        handler: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No handler for message {message}")]
    NoHandler { message: String },

    #[error("Dispatch rejected: {0}")]
    Rejected(String),
}

impl BusError {
    pub fn handler_failed<E>(handler: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::HandlerFailed {
            handler: handler.into(),
            source: source.into(),
        }
    }
}
