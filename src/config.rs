//! Debug configuration loading from environment variables.
//!
//! All values are loaded from `PANEL_*` environment variables. Missing or
//! invalid values fall back to defaults without crashing; missing flags stay
//! `None` so enablement resolution can treat them as absent signals.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `PANEL_DEBUGGER` | unset | Debugger subsystem active (`1`/`0`); unset = unavailable |
//! | `PANEL_PRODUCTION` | unset | Production-mode flag; unset = unknown |
//! | `PANEL_MAX_DEPTH` | 15 | Dump nesting depth, at most 64 |
//! | `PANEL_MAX_LENGTH` | 150 | Dump string length (chars), at most 65536 |
//! | `PANEL_MAX_ITEMS` | 100 | Dump entries per container, at most 10000 |
//! | `PANEL_CONTEXT` | auto | `console` or `panel`; auto picks console when stdout is a terminal |
//! | `PANEL_COLORS` | auto | ANSI colours in console context; `NO_COLOR` disables |
//! | `PANEL_LOG` | info | Tracing filter |
//! | `PANEL_LOG_FORMAT` | pretty | `json`, `pretty` or `compact` |

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::dump::DumpLimits;
use crate::environment::ExecutionContext;

pub const ENV_DEBUGGER: &str = "PANEL_DEBUGGER";
pub const ENV_PRODUCTION: &str = "PANEL_PRODUCTION";
pub const ENV_MAX_DEPTH: &str = "PANEL_MAX_DEPTH";
pub const ENV_MAX_LENGTH: &str = "PANEL_MAX_LENGTH";
pub const ENV_MAX_ITEMS: &str = "PANEL_MAX_ITEMS";
pub const ENV_CONTEXT: &str = "PANEL_CONTEXT";
pub const ENV_COLORS: &str = "PANEL_COLORS";
pub const ENV_LOG: &str = "PANEL_LOG";
pub const ENV_LOG_FORMAT: &str = "PANEL_LOG_FORMAT";

/// Explicit debugging configuration handed to a recorder at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// `None` when no debugger subsystem is available.
    pub debugger_active: Option<bool>,
    /// `None` when the production flag is unknown.
    pub production_mode: Option<bool>,
    pub limits: DumpLimits,
    pub context: ExecutionContext,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            debugger_active: None,
            production_mode: None,
            limits: DumpLimits::default(),
            context: ExecutionContext::Panel,
        }
    }
}

impl DebugConfig {
    /// Active debugger, explicitly not in production.
    pub fn development() -> Self {
        Self {
            debugger_active: Some(true),
            production_mode: Some(false),
            ..Self::default()
        }
    }

    /// Active debugger in a process flagged as production.
    pub fn production() -> Self {
        Self {
            debugger_active: Some(true),
            production_mode: Some(true),
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limits: DumpLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }
}

/// Parse a boolean flag env var. Unrecognised values count as missing.
pub(crate) fn parse_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a `usize` env var, returning `default` on missing or invalid.
fn parse_usize(key: &str, default: usize) -> usize {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<usize>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Read a non-empty string env var.
pub(crate) fn parse_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Load dump limits from environment, clamped to `1..=` the dump ceilings.
pub(crate) fn load_limits() -> DumpLimits {
    let defaults = DumpLimits::default();
    DumpLimits {
        max_depth: parse_usize(ENV_MAX_DEPTH, defaults.max_depth),
        max_length: parse_usize(ENV_MAX_LENGTH, defaults.max_length),
        max_items: parse_usize(ENV_MAX_ITEMS, defaults.max_items),
    }
    .clamped()
}

/// Load the execution context from environment, probing stdout when unset.
pub(crate) fn load_context() -> ExecutionContext {
    let terminal = std::io::stdout().is_terminal();
    let console = match parse_string(ENV_CONTEXT)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("console") | Some("cli") | Some("terminal") => true,
        Some("panel") | Some("html") => false,
        _ => terminal,
    };
    if !console {
        return ExecutionContext::Panel;
    }
    let colors = parse_flag(ENV_COLORS)
        .unwrap_or_else(|| terminal && std::env::var_os("NO_COLOR").is_none());
    ExecutionContext::Console { colors }
}

/// Load the full debug configuration from environment variables.
pub fn load() -> DebugConfig {
    DebugConfig {
        debugger_active: parse_flag(ENV_DEBUGGER),
        production_mode: parse_flag(ENV_PRODUCTION),
        limits: load_limits(),
        context: load_context(),
    }
}
