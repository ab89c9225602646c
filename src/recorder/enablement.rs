//! Resolve-once enablement state.

/// Whether a recorder captures messages.
///
/// `Unresolved` becomes `Enabled` or `Disabled` on first use and then stays
/// fixed for the recorder's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enablement {
    #[default]
    Unresolved,
    Enabled,
    Disabled,
}

impl Enablement {
    pub fn from_flag(enabled: Option<bool>) -> Self {
        match enabled {
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
            None => Self::Unresolved,
        }
    }

    pub fn is_resolved(self) -> bool {
        self != Self::Unresolved
    }

    /// Return the resolved value, running `check` only while unresolved.
    pub fn resolve<F: FnOnce() -> bool>(&mut self, check: F) -> bool {
        match *self {
            Self::Enabled => true,
            Self::Disabled => false,
            Self::Unresolved => {
                let enabled = check();
                *self = if enabled { Self::Enabled } else { Self::Disabled };
                enabled
            }
        }
    }
}
