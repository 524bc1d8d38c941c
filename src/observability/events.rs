//! Observable engine events
//!
//! Events are explicit and typed; the string forms are the stable names
//! that appear in log lines.

use std::fmt;

/// Observable events in the indexing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A filter name was seen for the first time and its index created
    FilterCreated,
    /// A record was (re)indexed across its filter memberships
    SetApplied,
    /// A dropped filter membership was removed from its index
    StaleEntryPruned,
}

impl Event {
    /// Returns the stable string name for this event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FilterCreated => "FILTER_CREATED",
            Event::SetApplied => "SET_APPLIED",
            Event::StaleEntryPruned => "STALE_ENTRY_PRUNED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
