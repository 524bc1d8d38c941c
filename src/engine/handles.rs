//! Record handle table

use std::collections::HashMap;

use crate::index::NodeId;
use crate::record::FilterOrdered;

use super::registry::SharedIndex;

/// Live handle for one (record, filter) pair: the filter name, the index
/// registered for it, and the node currently holding the record there.
pub(crate) struct FilterHandle<R: FilterOrdered> {
    pub filter: String,
    pub index: SharedIndex<R>,
    pub node: NodeId,
}

/// All per-filter handles for one record key, as of its last publish.
pub(crate) struct HandleSet<R: FilterOrdered> {
    entries: Vec<FilterHandle<R>>,
}

impl<R: FilterOrdered> HandleSet<R> {
    pub fn new(entries: Vec<FilterHandle<R>>) -> Self {
        Self { entries }
    }

    /// Filter-membership counts are small constants; a linear scan beats a
    /// map here.
    pub fn find(&self, filter: &str) -> Option<&FilterHandle<R>> {
        self.entries.iter().find(|handle| handle.filter == filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterHandle<R>> {
        self.entries.iter()
    }
}

/// Record key → handle set. Plain associative mapping; replaced wholesale
/// by `publish`, never selectively edited.
pub(crate) struct HandleTable<R: FilterOrdered> {
    entries: HashMap<R::Key, HandleSet<R>>,
}

impl<R: FilterOrdered> HandleTable<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, key: &R::Key) -> Option<&HandleSet<R>> {
        self.entries.get(key)
    }

    /// Replace the entry for `key` wholesale.
    pub fn publish(&mut self, key: R::Key, set: HandleSet<R>) {
        self.entries.insert(key, set);
    }

    /// Number of tracked record keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
