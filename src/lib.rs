//! log-to-panel
//!
//! A message-bus middleware that records what each dispatched message did,
//! for display in a developer inspection panel.
//!
//! For every successfully handled message the [`PanelRecorder`] keeps:
//!
//! - **name**: short type name of the message
//! - **duration**: wall-clock time of the rest of the pipeline, in milliseconds
//! - **message dump**: bounded rendering of the payload
//! - **result dump**: bounded rendering of every handler result
//!
//! Recording is instrumentation only. The recorder never changes routing,
//! never swallows downstream failures and never lets a dump failure escape.
//!
//! # Enablement
//!
//! A recorder is either switched on or off explicitly, or asks its
//! [`DebugEnvironment`] once, on first dispatch: it records only when a
//! debugger is active and the process is known not to be in production.

pub mod bus;
pub mod config;
pub mod dump;
pub mod environment;
pub mod panel;
pub mod recorder;
pub mod telemetry;

pub use config::DebugConfig;
pub use environment::{DebugEnvironment, ExecutionContext, ProcessEnvironment};
pub use panel::{Panel, PanelSnapshot};
pub use recorder::{Enablement, HandledMessageRecord, PanelRecorder};
