//! Observability for rankset
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on ranking
//! 2. Deterministic output: one JSON line per event, alphabetical fields
//! 3. Counters only, monotonic, reset on process start
//! 4. Nothing here writes unless the embedding opts in
//!    (`EngineConfig::with_event_logging`)

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
