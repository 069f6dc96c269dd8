//! Configuration for the anchoring engine

/// Options applied when a binding is installed
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorConfig {
    /// Apply every wiring once right after subscribing, so the relationship
    /// holds before the first change
    pub sync_on_bind: bool,

    /// Also watch each anchored quantity of the observed element and put it
    /// back when something else writes it
    pub reassert: bool,

    /// Deepest re-entrant propagation allowed inside one binding
    pub max_cascade_depth: usize,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            sync_on_bind: true,
            reassert: false,
            max_cascade_depth: 64,
        }
    }
}

impl AnchorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync_on_bind(mut self, sync: bool) -> Self {
        self.sync_on_bind = sync;
        self
    }

    pub fn with_reassert(mut self, reassert: bool) -> Self {
        self.reassert = reassert;
        self
    }

    /// Set the cascade depth limit. Zero is treated as one.
    pub fn with_max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = depth.max(1);
        self
    }
}
