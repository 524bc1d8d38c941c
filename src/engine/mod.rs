//! Indexing engine for rankset
//!
//! One `RankEngine` owns everything: the filter registry (filter name →
//! ordered index), the handle table (record key → per-filter handles), the
//! configuration, and the metrics registry.
//!
//! # Design Principles
//!
//! - Single writer: all mutation flows through `set(&mut self, ..)`; the
//!   registry and handle table are never touched from inside a per-filter
//!   unit of work
//! - Per-filter fan-out: a record's index updates run concurrently, one
//!   unit per filter it belongs to, each locking exactly one index
//! - Single publish: the handle table is replaced wholesale after every
//!   unit has finished; no partial update is observable
//!
//! # Invariants
//!
//! - At most one live node per (key, filter) pair in any index
//! - Within one filter, the stale value is removed before the new value is
//!   inserted (enforced by a single lock scope)
//! - A handle's index pointer and the registry's mapping for that filter
//!   always agree

mod config;
mod errors;
mod handles;
mod indexer;
mod registry;
mod summary;

pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult};
pub use indexer::RankEngine;
pub use summary::{FilterSummary, SummaryReport};
