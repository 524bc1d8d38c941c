//! Filter registry

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::index::RankList;
use crate::record::FilterOrdered;

/// Shared ownership of one filter's ordered index. The engine hands clones
/// to per-filter units of work; the registry keeps the canonical mapping.
pub(crate) type SharedIndex<R> = Arc<Mutex<RankList<Arc<R>>>>;

/// Lazily creates and owns one ordered index per distinct filter name.
///
/// Indexes are never removed: filter lifetime is engine-lifetime once
/// created. Mutated only from the orchestrating `set` path, never from a
/// per-filter unit of work.
pub(crate) struct FilterRegistry<R: FilterOrdered> {
    indexes: HashMap<String, SharedIndex<R>>,
}

impl<R: FilterOrdered> FilterRegistry<R> {
    pub fn new() -> Self {
        Self {
            indexes: HashMap::new(),
        }
    }

    /// Existing index for `name`, or a fresh empty one stored under it.
    /// The flag reports whether this call created the index.
    pub fn index_for(&mut self, name: &str) -> (SharedIndex<R>, bool) {
        match self.indexes.get(name) {
            Some(index) => (Arc::clone(index), false),
            None => {
                let index: SharedIndex<R> = Arc::new(Mutex::new(RankList::new()));
                self.indexes.insert(name.to_string(), Arc::clone(&index));
                (index, true)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedIndex<R>> {
        self.indexes.get(name).map(Arc::clone)
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedIndex<R>)> {
        self.indexes
            .iter()
            .map(|(name, index)| (name.as_str(), index))
    }
}
