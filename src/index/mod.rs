//! Ordered-index primitive for rankset
//!
//! One `RankList` exists per filter; each maintains its own total order over
//! the records that belong to that filter.
//!
//! # Design Principles
//!
//! - Rank-aware: every link carries a span, so rank recomputation is
//!   O(log n) instead of a scan
//! - Handle-based: insertion returns an opaque `NodeId` with O(1)
//!   predecessor/successor navigation
//! - Deterministic: level generation uses a fixed-seed RNG, so the structure
//!   is reproducible for identical operation sequences
//!
//! # Invariants
//!
//! - At most one live node per order-equality class (`insert_or_update`
//!   replaces in place)
//! - Spans along any search path sum to the 0-based rank of the reached node
//!   plus one
//! - A `NodeId` stays valid until the node it names is removed

mod order;
mod skiplist;

pub use order::RankOrder;
pub use skiplist::{NodeId, RankList};
