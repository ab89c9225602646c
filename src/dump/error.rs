//! Dump error types.

use thiserror::Error;

/// Errors raised while capturing a dump.
///
/// The recorder contains these; they never reach the bus caller.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Returned by `Dump` impls for values they cannot describe.
    #[error("Unrenderable value: {0}")]
    Unrenderable(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Dump panicked: {0}")]
    Panicked(String),
}
