//! Bounded, human-readable dumps of messages and handler results.
//!
//! Capturing and rendering are separate steps: a value is first captured
//! into a [`Node`] tree under [`DumpLimits`], then rendered for a
//! [`RenderTarget`]. Shared allocations (`Rc`, `Arc`) are tracked by address
//! so self-referential graphs terminate.

mod dumper;
mod error;
mod impls;
mod limits;
mod node;
mod render;

pub use dumper::{Dump, Dumper, Fields};
pub use error::DumpError;
pub use impls::Serialized;
pub use limits::{DumpLimits, DEPTH_CEILING, ITEMS_CEILING, LENGTH_CEILING};
pub use node::Node;
pub use render::{render, RenderTarget};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Capture `value` into a [`Node`] tree.
///
/// A panic inside a `Dump` implementation is caught and returned as
/// [`DumpError::Panicked`].
pub fn capture<T: Dump + ?Sized>(value: &T, limits: DumpLimits) -> Result<Node, DumpError> {
    let mut dumper = Dumper::new(limits);
    match panic::catch_unwind(AssertUnwindSafe(|| value.dump(&mut dumper))) {
        Ok(result) => result,
        Err(payload) => Err(DumpError::Panicked(panic_message(&*payload))),
    }
}

/// Capture and render `value` in one step.
///
/// ```
/// use log_to_panel::dump::{dump_to_string, DumpLimits, RenderTarget};
///
/// let text = dump_to_string(&42, DumpLimits::default(), RenderTarget::Text).unwrap();
/// assert_eq!(text, "42");
/// ```
pub fn dump_to_string<T: Dump + ?Sized>(
    value: &T,
    limits: DumpLimits,
    target: RenderTarget,
) -> Result<String, DumpError> {
    let node = capture(value, limits)?;
    Ok(render(&node, target))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
