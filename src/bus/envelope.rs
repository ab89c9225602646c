//! Envelope and stamp types carried through the middleware stack.

use std::fmt;
use std::sync::Arc;

use super::message::{AsAny, Message};
use crate::dump::Dump;

/// Side-channel annotation attached to an [`Envelope`] by a pipeline stage.
pub trait Stamp: AsAny + fmt::Debug + Send + Sync {}

/// Records the return value of one handler after successful handling.
#[derive(Clone)]
pub struct HandledStamp {
    handler_name: String,
    result: Arc<dyn Dump + Send + Sync>,
}

impl HandledStamp {
    pub fn new<R>(handler_name: impl Into<String>, result: R) -> Self
    where
        R: Dump + Send + Sync + 'static,
    {
        Self {
            handler_name: handler_name.into(),
            result: Arc::new(result),
        }
    }

    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    pub fn result(&self) -> &(dyn Dump + Send + Sync) {
        &*self.result
    }
}

impl fmt::Debug for HandledStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandledStamp")
            .field("handler_name", &self.handler_name)
            .finish_non_exhaustive()
    }
}

impl Stamp for HandledStamp {}

/// A message plus the stamps accumulated while it moves through the stack.
///
/// Envelopes are cheap to clone: the message and every stamp are shared.
#[derive(Clone)]
pub struct Envelope {
    message: Arc<dyn Message>,
    stamps: Vec<Arc<dyn Stamp>>,
}

impl Envelope {
    pub fn new<M: Message>(message: M) -> Self {
        Self::from_shared(Arc::new(message))
    }

    pub fn from_shared(message: Arc<dyn Message>) -> Self {
        Self {
            message,
            stamps: Vec::new(),
        }
    }

    pub fn message(&self) -> &dyn Message {
        &*self.message
    }

    /// Shared handle on the message, valid after the envelope is consumed.
    pub fn shared_message(&self) -> Arc<dyn Message> {
        Arc::clone(&self.message)
    }

    /// Return a new envelope with `stamp` appended.
    pub fn with<S: Stamp>(mut self, stamp: S) -> Self {
        self.stamps.push(Arc::new(stamp));
        self
    }

    /// All stamps of type `S`, in the order they were attached.
    pub fn all<S: Stamp>(&self) -> impl Iterator<Item = &S> + '_ {
        self.stamps
            .iter()
            .filter_map(|stamp| AsAny::as_any(&**stamp).downcast_ref::<S>())
    }

    /// Most recently attached stamp of type `S`.
    pub fn last<S: Stamp>(&self) -> Option<&S> {
        self.stamps
            .iter()
            .rev()
            .find_map(|stamp| AsAny::as_any(&**stamp).downcast_ref::<S>())
    }

    pub fn stamp_count(&self) -> usize {
        self.stamps.len()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("message", &self.message.type_name())
            .field("stamps", &self.stamps)
            .finish()
    }
}
