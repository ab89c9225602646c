//! Middleware contract and stack traversal.

use std::sync::Arc;

use super::envelope::Envelope;
use super::error::BusError;

/// One stage of a message-bus pipeline.
///
/// A stage receives the envelope together with a [`Next`] handle on the
/// remaining stages. Calling [`Next::run`] continues dispatch; returning
/// without calling it short-circuits the rest of the stack.
pub trait Middleware: Send + Sync {
    fn handle(&self, envelope: Envelope, next: Next<'_>) -> Result<Envelope, BusError>;
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn handle(&self, envelope: Envelope, next: Next<'_>) -> Result<Envelope, BusError> {
        (**self).handle(envelope, next)
    }
}

impl<M: Middleware + ?Sized> Middleware for Box<M> {
    fn handle(&self, envelope: Envelope, next: Next<'_>) -> Result<Envelope, BusError> {
        (**self).handle(envelope, next)
    }
}

/// Handle on the stages that follow the current one.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    stages: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub fn new(stages: &'a [Arc<dyn Middleware>]) -> Self {
        Self { stages }
    }

    /// Invoke the next stage. An exhausted stack returns the envelope as-is.
    pub fn run(self, envelope: Envelope) -> Result<Envelope, BusError> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.handle(envelope, Next { stages: rest }),
            None => Ok(envelope),
        }
    }

    /// Number of stages still to run.
    pub fn remaining(&self) -> usize {
        self.stages.len()
    }
}

/// Middleware backed by a closure. Built with [`from_fn`].
pub struct FnMiddleware<F> {
    f: F,
}

/// Adapt a closure into a [`Middleware`].
///
/// ```
/// use log_to_panel::bus::{from_fn, MessageBus};
///
/// let bus = MessageBus::builder("command.bus")
///     .middleware(from_fn(|envelope, next| next.run(envelope)))
///     .build();
/// assert_eq!(bus.stage_count(), 1);
/// ```
pub fn from_fn<F>(f: F) -> FnMiddleware<F>
where
    F: for<'a> Fn(Envelope, Next<'a>) -> Result<Envelope, BusError> + Send + Sync,
{
    FnMiddleware { f }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(Envelope, Next<'a>) -> Result<Envelope, BusError> + Send + Sync,
{
    fn handle(&self, envelope: Envelope, next: Next<'_>) -> Result<Envelope, BusError> {
        (self.f)(envelope, next)
    }
}
