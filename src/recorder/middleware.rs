//! The recording middleware.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use super::enablement::Enablement;
use super::record::{duration_ms, HandledMessageRecord};
use crate::bus::{BusError, Envelope, HandledStamp, Message, Middleware, Next};
use crate::config::DebugConfig;
use crate::dump::{dump_to_string, Dump, DumpLimits, RenderTarget};
use crate::environment::{DebugEnvironment, ProcessEnvironment};
use crate::panel::PanelSnapshot;
use crate::telemetry::{
    record_dispatch_failure, record_dump_failure, record_message_recorded, DispatchSpan, SpanExt,
};

/// Middleware that records every successfully handled message for a panel.
///
/// The recorder never alters the envelope or the result, and downstream
/// failures pass through untouched without producing a record.
///
/// ```
/// use std::sync::Arc;
/// use log_to_panel::bus::{from_fn, HandledStamp, MessageBus};
/// use log_to_panel::{DebugConfig, PanelRecorder};
/// # use log_to_panel::bus::Message;
/// # use log_to_panel::dump::{Dump, DumpError, Dumper, Node};
/// # struct Ping;
/// # impl Dump for Ping {
/// #     fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
/// #         d.object("Ping", |_| Ok(()))
/// #     }
/// # }
/// # impl Message for Ping {}
///
/// let recorder = Arc::new(PanelRecorder::with_config(
///     "command.bus",
///     Some(true),
///     DebugConfig::development(),
/// ));
/// let bus = MessageBus::builder("command.bus")
///     .middleware(Arc::clone(&recorder))
///     .middleware(from_fn(|envelope, next| {
///         next.run(envelope.with(HandledStamp::new("ping_handler", "pong")))
///     }))
///     .build();
///
/// bus.dispatch(Ping).unwrap();
/// assert_eq!(recorder.records()[0].name(), "Ping");
/// ```
pub struct PanelRecorder {
    bus_name: String,
    enablement: Mutex<Enablement>,
    environment: Arc<dyn DebugEnvironment>,
    records: RwLock<Vec<HandledMessageRecord>>,
}

impl PanelRecorder {
    /// Create a recorder. `enabled = None` defers the decision to
    /// `environment` on first dispatch.
    pub fn new(
        bus_name: impl Into<String>,
        enabled: Option<bool>,
        environment: Arc<dyn DebugEnvironment>,
    ) -> Self {
        Self {
            bus_name: bus_name.into(),
            enablement: Mutex::new(Enablement::from_flag(enabled)),
            environment,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_config(bus_name: impl Into<String>, enabled: Option<bool>, config: DebugConfig) -> Self {
        Self::new(bus_name, enabled, Arc::new(config))
    }

    /// Recorder whose enablement, limits and context come from `PANEL_*`
    /// environment variables, read on first dispatch.
    pub fn from_env(bus_name: impl Into<String>) -> Self {
        Self::new(bus_name, None, Arc::new(ProcessEnvironment))
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    /// Snapshot of the records in handling order.
    pub fn records(&self) -> Vec<HandledMessageRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Whether this recorder captures messages, resolving it if needed.
    pub fn is_enabled(&self) -> bool {
        self.resolve_enabled()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot::new(&self.bus_name, self.records())
    }

    fn resolve_enabled(&self) -> bool {
        let mut state = self.enablement.lock();
        if state.is_resolved() {
            return *state == Enablement::Enabled;
        }
        let enabled = state.resolve(|| self.environment.recording_allowed());
        debug!(bus = %self.bus_name, enabled, "resolved panel recording");
        enabled
    }

    fn record(&self, message: &dyn Message, result: &Envelope, duration_ms: f64) {
        let limits = self.environment.limits();
        let target = self.environment.context().render_target();

        let name = message.short_name().to_string();
        let result_dump = result
            .all::<HandledStamp>()
            .map(|stamp| self.dump(stamp.result(), limits, target))
            .collect::<Vec<_>>()
            .join("\n");
        let message_dump = self.dump(message, limits, target);

        debug!(
            bus = %self.bus_name,
            message = %name,
            duration_ms,
            "recorded handled message"
        );
        record_message_recorded(&self.bus_name, duration_ms);

        let record = HandledMessageRecord::new(name, duration_ms, message_dump, result_dump);
        self.records.write().push(record);
    }

    fn dump<T: Dump + ?Sized>(&self, value: &T, limits: DumpLimits, target: RenderTarget) -> String {
        match dump_to_string(value, limits, target) {
            Ok(dump) => dump,
            Err(e) => {
                warn!(bus = %self.bus_name, error = %e, "dump failed, using placeholder");
                record_dump_failure(&self.bus_name);
                format!("[dump failed: {e}]")
            }
        }
    }
}

impl Middleware for PanelRecorder {
    fn handle(&self, envelope: Envelope, next: Next<'_>) -> Result<Envelope, BusError> {
        let message = envelope.shared_message();
        let span = DispatchSpan::new(&self.bus_name, message.short_name());
        let _entered = span.enter();

        let started = Instant::now();
        let outcome = next.run(envelope);
        let elapsed = started.elapsed();

        span.record_result(&outcome);
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                record_dispatch_failure(&self.bus_name);
                return Err(e);
            }
        };

        let duration_ms = duration_ms(elapsed);
        span.record_duration_ms(duration_ms);

        if !self.resolve_enabled() {
            return Ok(result);
        }

        self.record(&*message, &result, duration_ms);
        Ok(result)
    }
}

impl std::fmt::Debug for PanelRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelRecorder")
            .field("bus_name", &self.bus_name)
            .field("enablement", &*self.enablement.lock())
            .field("records", &self.len())
            .finish()
    }
}
