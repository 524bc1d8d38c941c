//! Engine configuration

/// Tunable engine behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Remove a record's entry from the index of every filter it no longer
    /// lists. Disabling reproduces the historical behavior of leaving the
    /// orphan in place: that filter's population stays inflated and the
    /// record keeps being served there at its last indexed position.
    pub prune_dropped_filters: bool,

    /// Emit structured log events from the engine. Off by default: an
    /// embedded library must not write to stdout unasked.
    pub event_logging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prune_dropped_filters: true,
            event_logging: false,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prune_dropped_filters(mut self, prune: bool) -> Self {
        self.prune_dropped_filters = prune;
        self
    }

    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.event_logging = enabled;
        self
    }
}
