//! Record capability and result rows
//!
//! The engine is generic over any record type that can name itself, list
//! its filter memberships, and totally order itself against its peers.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::index::RankOrder;

/// Capability contract for indexable records.
///
/// `filters()` is read on every `set`; it may list a filter more than once
/// (duplicates are collapsed) or be empty (the record is then indexed
/// nowhere). The `RankOrder` supertrait supplies the per-filter total
/// order, tie-break included.
pub trait FilterOrdered: RankOrder {
    /// Stable, hashable identity.
    type Key: Clone + Eq + Hash + fmt::Debug;

    fn key(&self) -> Self::Key;

    /// Names of the filters this record currently belongs to.
    fn filters(&self) -> Vec<String>;
}

/// One ranked row, as returned by `get` and `get_around`.
///
/// `rank` is 0-based within `filter`'s order and `total` is that filter's
/// population at query time; every row of one `get_around` call carries the
/// same `total`. `requested` distinguishes the directly fetched record from
/// rows returned only as neighbors.
#[derive(Debug, Clone)]
pub struct RankedEntry<R: FilterOrdered> {
    pub key: R::Key,
    pub record: Arc<R>,
    pub filter: String,
    pub rank: usize,
    pub total: usize,
    pub requested: bool,
}

impl<R: FilterOrdered + fmt::Display> fmt::Display for RankedEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} {:>5}|{}",
            self.filter, self.rank, self.total, self.requested, self.record
        )
    }
}
