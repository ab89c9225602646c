//! Debugging-environment contract consumed by the recorder.
//!
//! A [`DebugEnvironment`] answers whether recording should happen at all and
//! how dumps are bounded and formatted. [`DebugConfig`] is the explicit,
//! in-memory implementation; [`ProcessEnvironment`] reads `PANEL_*`
//! variables only when asked.

use serde::{Deserialize, Serialize};

use crate::config::{self, DebugConfig};
use crate::dump::{DumpLimits, RenderTarget};

/// Where dumps will be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionContext {
    /// Interactive text console.
    Console { colors: bool },
    /// Visual panel that embeds markup.
    Panel,
}

impl ExecutionContext {
    pub fn render_target(self) -> RenderTarget {
        match self {
            ExecutionContext::Console { colors: true } => RenderTarget::Ansi,
            ExecutionContext::Console { colors: false } => RenderTarget::Text,
            ExecutionContext::Panel => RenderTarget::Html,
        }
    }
}

/// Host debugging environment.
pub trait DebugEnvironment: Send + Sync {
    /// `None` when no debugger subsystem is available.
    fn debugger_active(&self) -> Option<bool>;

    /// `None` when the production flag is not known.
    fn production_mode(&self) -> Option<bool>;

    fn limits(&self) -> DumpLimits;

    fn context(&self) -> ExecutionContext;

    /// Recording is allowed only with an active debugger in a process
    /// explicitly flagged as non-production. Any missing signal denies.
    fn recording_allowed(&self) -> bool {
        self.debugger_active() == Some(true) && self.production_mode() == Some(false)
    }
}

impl DebugEnvironment for DebugConfig {
    fn debugger_active(&self) -> Option<bool> {
        self.debugger_active
    }

    fn production_mode(&self) -> Option<bool> {
        self.production_mode
    }

    fn limits(&self) -> DumpLimits {
        self.limits
    }

    fn context(&self) -> ExecutionContext {
        self.context
    }
}

/// Reads the process environment on every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl DebugEnvironment for ProcessEnvironment {
    fn debugger_active(&self) -> Option<bool> {
        config::parse_flag(config::ENV_DEBUGGER)
    }

    fn production_mode(&self) -> Option<bool> {
        config::parse_flag(config::ENV_PRODUCTION)
    }

    fn limits(&self) -> DumpLimits {
        config::load_limits()
    }

    fn context(&self) -> ExecutionContext {
        config::load_context()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_requires_every_signal() {
        let cases = [
            (Some(true), Some(false), true),
            (Some(true), Some(true), false),
            (Some(false), Some(false), false),
            (None, Some(false), false),
            (Some(true), None, false),
            (None, None, false),
        ];
        for (debugger, production, expected) in cases {
            let config = DebugConfig {
                debugger_active: debugger,
                production_mode: production,
                ..DebugConfig::default()
            };
            assert_eq!(
                config.recording_allowed(),
                expected,
                "debugger={debugger:?} production={production:?}"
            );
        }
    }

    #[test]
    fn test_context_render_targets() {
        assert_eq!(
            ExecutionContext::Console { colors: true }.render_target(),
            RenderTarget::Ansi
        );
        assert_eq!(
            ExecutionContext::Console { colors: false }.render_target(),
            RenderTarget::Text
        );
        assert_eq!(ExecutionContext::Panel.render_target(), RenderTarget::Html);
    }
}
