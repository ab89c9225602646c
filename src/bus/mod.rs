//! Minimal message-bus pipeline: envelopes, stamps and a middleware stack.
//!
//! Routing and handler discovery belong to the host application. Handler
//! stages are ordinary middleware that attach a [`HandledStamp`] per handler.

mod envelope;
mod error;
mod message;
mod middleware;

pub use envelope::{Envelope, HandledStamp, Stamp};
pub use error::BusError;
pub use message::{short_type_name, AsAny, Message};
pub use middleware::{from_fn, FnMiddleware, Middleware, Next};

use std::sync::Arc;

use tracing::trace;

/// A named bus running envelopes through a fixed stack of middleware.
pub struct MessageBus {
    name: String,
    stages: Vec<Arc<dyn Middleware>>,
}

impl MessageBus {
    pub fn builder(name: impl Into<String>) -> MessageBusBuilder {
        MessageBusBuilder {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Wrap `message` in a fresh envelope and dispatch it.
    pub fn dispatch<M: Message>(&self, message: M) -> Result<Envelope, BusError> {
        self.dispatch_envelope(Envelope::new(message))
    }

    pub fn dispatch_envelope(&self, envelope: Envelope) -> Result<Envelope, BusError> {
        trace!(
            bus = %self.name,
            message = envelope.message().short_name(),
            "dispatching"
        );
        Next::new(&self.stages).run(envelope)
    }
}

/// Builder for [`MessageBus`]. Stages run in the order they are added.
pub struct MessageBusBuilder {
    name: String,
    stages: Vec<Arc<dyn Middleware>>,
}

impl MessageBusBuilder {
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    pub fn shared(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.stages.push(middleware);
        self
    }

    pub fn build(self) -> MessageBus {
        MessageBus {
            name: self.name,
            stages: self.stages,
        }
    }
}
