//! Display limits applied while capturing a dump.

use serde::{Deserialize, Serialize};

/// Caps on how much of a value graph is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpLimits {
    /// Containers nested deeper than this are collapsed to their header.
    pub max_depth: usize,
    /// Strings are cut after this many characters.
    pub max_length: usize,
    /// Containers and objects show at most this many entries.
    pub max_items: usize,
}

/// Upper bounds applied to any configured limits. Capture recurses once per
/// nesting level, so depth must stay well inside the thread stack.
pub const DEPTH_CEILING: usize = 64;
pub const LENGTH_CEILING: usize = 65_536;
pub const ITEMS_CEILING: usize = 10_000;

impl DumpLimits {
    /// Limits forced into `1..=CEILING` for every field.
    pub fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.clamp(1, DEPTH_CEILING),
            max_length: self.max_length.clamp(1, LENGTH_CEILING),
            max_items: self.max_items.clamp(1, ITEMS_CEILING),
        }
    }
}

impl Default for DumpLimits {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_length: 150,
            max_items: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_applies_floor_and_ceiling() {
        let limits = DumpLimits {
            max_depth: usize::MAX,
            max_length: 0,
            max_items: 50,
        }
        .clamped();
        assert_eq!(limits.max_depth, DEPTH_CEILING);
        assert_eq!(limits.max_length, 1);
        assert_eq!(limits.max_items, 50);
        assert_eq!(DumpLimits::default().clamped(), DumpLimits::default());
    }
}
