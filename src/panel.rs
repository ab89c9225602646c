//! Pull-only read side for inspection panels.
//!
//! A panel asks recorders for their telemetry; recorders never push.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::recorder::{round_ms, HandledMessageRecord, PanelRecorder};

/// Point-in-time view of one recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub bus_name: String,
    pub count: usize,
    pub total_duration_ms: f64,
    pub records: Vec<HandledMessageRecord>,
}

impl PanelSnapshot {
    pub fn new(bus_name: &str, records: Vec<HandledMessageRecord>) -> Self {
        let total = records.iter().map(HandledMessageRecord::duration_ms).sum();
        Self {
            bus_name: bus_name.to_string(),
            count: records.len(),
            total_duration_ms: round_ms(total),
            records,
        }
    }
}

/// Registry of recorders across the buses of one application.
#[derive(Debug, Default)]
pub struct Panel {
    recorders: RwLock<Vec<Arc<PanelRecorder>>>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, recorder: Arc<PanelRecorder>) {
        self.recorders.write().push(recorder);
    }

    /// First registered recorder attached to `bus_name`.
    pub fn recorder(&self, bus_name: &str) -> Option<Arc<PanelRecorder>> {
        self.recorders
            .read()
            .iter()
            .find(|recorder| recorder.bus_name() == bus_name)
            .cloned()
    }

    pub fn bus_names(&self) -> Vec<String> {
        self.recorders
            .read()
            .iter()
            .map(|recorder| recorder.bus_name().to_string())
            .collect()
    }

    /// Snapshots in registration order.
    pub fn snapshots(&self) -> Vec<PanelSnapshot> {
        self.recorders
            .read()
            .iter()
            .map(|recorder| recorder.snapshot())
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.recorders.read().iter().map(|recorder| recorder.len()).sum()
    }

    pub fn total_duration_ms(&self) -> f64 {
        let total = self
            .snapshots()
            .iter()
            .map(|snapshot| snapshot.total_duration_ms)
            .sum();
        round_ms(total)
    }

    /// All snapshots as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshots())
    }
}
