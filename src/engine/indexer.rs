//! Indexing engine

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::index::NodeId;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::record::{FilterOrdered, RankedEntry};

use super::config::EngineConfig;
use super::errors::{EngineError, EngineResult};
use super::handles::{FilterHandle, HandleSet, HandleTable};
use super::registry::{FilterRegistry, SharedIndex};
use super::summary::{FilterSummary, SummaryReport};

/// Multi-filter ranked index engine.
///
/// Owns the filter registry and the handle table; all mutation flows
/// through `set(&mut self, ..)`, so a single engine value is single-writer
/// by construction. Sharing one engine across threads requires external
/// serialization: reads racing an in-flight `set` on the same key or
/// filter are not defended.
pub struct RankEngine<R: FilterOrdered> {
    registry: FilterRegistry<R>,
    handles: HandleTable<R>,
    config: EngineConfig,
    metrics: MetricsRegistry,
}

/// One unit of work for `set`: everything a per-filter update needs, so
/// the unit itself never touches the registry or the handle table.
struct IndexJob<R: FilterOrdered> {
    filter: String,
    index: SharedIndex<R>,
    stale: Option<NodeId>,
}

impl<R> RankEngine<R>
where
    R: FilterOrdered + Send + Sync,
{
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            registry: FilterRegistry::new(),
            handles: HandleTable::new(),
            config,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Index `record` under every filter it currently lists.
    ///
    /// For each filter: the stale value from the previous submission (if
    /// any) is removed, then the new value inserted, strictly in that
    /// order within one lock scope. Updates for different filters run
    /// concurrently and independently. The handle table is published once,
    /// after every per-filter update has finished.
    pub fn set(&mut self, record: R) -> EngineResult<()> {
        let filters = dedup_filters(record.filters());
        let key = record.key();
        let record = Arc::new(record);

        // Registry creation stays on the orchestrating path.
        let mut jobs = Vec::with_capacity(filters.len());
        for filter in filters {
            let (index, created) = self.registry.index_for(&filter);
            if created {
                self.metrics.increment_filters_created();
                if self.config.event_logging {
                    Logger::info(Event::FilterCreated.as_str(), &[("filter", filter.as_str())]);
                }
            }
            let stale = self
                .handles
                .lookup(&key)
                .and_then(|set| set.find(&filter))
                .map(|handle| handle.node);
            jobs.push(IndexJob {
                filter,
                index,
                stale,
            });
        }

        let reindexed: Vec<FilterHandle<R>> = if jobs.len() > 1 {
            jobs.into_par_iter()
                .map(|job| reindex(job, &record))
                .collect::<EngineResult<_>>()?
        } else {
            jobs.into_iter()
                .map(|job| reindex(job, &record))
                .collect::<EngineResult<_>>()?
        };

        if self.config.prune_dropped_filters {
            self.prune_dropped(&key, &reindexed)?;
        }

        if self.config.event_logging {
            let key_repr = format!("{:?}", key);
            let count = reindexed.len().to_string();
            Logger::trace(
                Event::SetApplied.as_str(),
                &[("filters", count.as_str()), ("key", key_repr.as_str())],
            );
        }
        self.handles.publish(key, HandleSet::new(reindexed));
        self.metrics.increment_sets_applied();
        Ok(())
    }

    /// Record, current rank, and filter population for `key` within
    /// `filter`. `Ok(None)` when the key is unknown or the record was not
    /// indexed under that filter.
    pub fn get(&self, key: &R::Key, filter: &str) -> EngineResult<Option<RankedEntry<R>>> {
        let Some(handle) = self.locate(key, filter) else {
            return Ok(None);
        };
        let list = handle.index.lock().map_err(|_| EngineError::IndexPoisoned {
            filter: filter.to_string(),
        })?;
        let Some(rank) = list.rank_of(handle.node) else {
            return Ok(None);
        };
        let Some(record) = list.value(handle.node) else {
            return Ok(None);
        };
        self.metrics.increment_lookups_served();
        Ok(Some(RankedEntry {
            key: record.key(),
            record: Arc::clone(record),
            filter: filter.to_string(),
            rank,
            total: list.len(),
            requested: true,
        }))
    }

    /// The target record plus up to `before` ranked predecessors and
    /// `after` ranked successors within `filter`, in ascending rank order.
    ///
    /// Empty when (key, filter) does not resolve. The window is truncated,
    /// never padded, at either boundary of the order; the target row is
    /// the one marked `requested`.
    pub fn get_around(
        &self,
        key: &R::Key,
        filter: &str,
        before: usize,
        after: usize,
    ) -> EngineResult<Vec<RankedEntry<R>>> {
        let Some(handle) = self.locate(key, filter) else {
            return Ok(Vec::new());
        };
        let list = handle.index.lock().map_err(|_| EngineError::IndexPoisoned {
            filter: filter.to_string(),
        })?;
        let Some(target_rank) = list.rank_of(handle.node) else {
            return Ok(Vec::new());
        };
        let Some(target) = list.value(handle.node) else {
            return Ok(Vec::new());
        };
        let total = list.len();

        let entry = |record: &Arc<R>, rank: usize, requested: bool| RankedEntry {
            key: record.key(),
            record: Arc::clone(record),
            filter: filter.to_string(),
            rank,
            total,
            requested,
        };

        let want_before = before.min(target_rank);
        let want_after = after.min(total - target_rank - 1);
        let mut rows = Vec::with_capacity(want_before + want_after + 1);

        // Predecessors are walked closest-first, then reversed into
        // ascending rank order.
        let mut preceding = Vec::with_capacity(want_before);
        let mut cursor = handle.node;
        for step in 1..=want_before {
            let Some(prev) = list.predecessor(cursor) else {
                break;
            };
            let Some(record) = list.value(prev) else {
                break;
            };
            preceding.push(entry(record, target_rank - step, false));
            cursor = prev;
        }
        rows.extend(preceding.into_iter().rev());

        rows.push(entry(target, target_rank, true));

        cursor = handle.node;
        for step in 1..=want_after {
            let Some(next) = list.successor(cursor) else {
                break;
            };
            let Some(record) = list.value(next) else {
                break;
            };
            rows.push(entry(record, target_rank + step, false));
            cursor = next;
        }

        self.metrics.increment_windows_served();
        Ok(rows)
    }

    /// Current population of `filter`; 0 for a filter never seen.
    pub fn size(&self, filter: &str) -> EngineResult<usize> {
        match self.registry.get(filter) {
            Some(index) => {
                let list = index.lock().map_err(|_| EngineError::IndexPoisoned {
                    filter: filter.to_string(),
                })?;
                Ok(list.len())
            }
            None => Ok(0),
        }
    }

    /// Deterministic engine-wide report: tracked keys and per-filter
    /// populations, sorted by filter name.
    pub fn summary(&self) -> EngineResult<SummaryReport> {
        let mut filters = Vec::with_capacity(self.registry.len());
        for (name, index) in self.registry.iter() {
            let list = index.lock().map_err(|_| EngineError::IndexPoisoned {
                filter: name.to_string(),
            })?;
            filters.push(FilterSummary {
                filter: name.to_string(),
                population: list.len(),
            });
        }
        filters.sort_by(|a, b| a.filter.cmp(&b.filter));
        Ok(SummaryReport {
            total_records: self.handles.len(),
            total_filters: filters.len(),
            filters,
        })
    }

    fn locate(&self, key: &R::Key, filter: &str) -> Option<&FilterHandle<R>> {
        self.handles.lookup(key)?.find(filter)
    }

    /// Remove the record's entry from every filter it was indexed under
    /// last time but no longer lists.
    fn prune_dropped(&self, key: &R::Key, kept: &[FilterHandle<R>]) -> EngineResult<()> {
        let Some(prior) = self.handles.lookup(key) else {
            return Ok(());
        };
        for old in prior.iter() {
            if kept.iter().any(|handle| handle.filter == old.filter) {
                continue;
            }
            let pruned = {
                let mut list = old.index.lock().map_err(|_| EngineError::IndexPoisoned {
                    filter: old.filter.clone(),
                })?;
                match list.value(old.node).cloned() {
                    Some(value) => list.remove(&value).is_some(),
                    None => false,
                }
            };
            if pruned {
                self.metrics.increment_stale_entries_pruned();
                if self.config.event_logging {
                    Logger::info(
                        Event::StaleEntryPruned.as_str(),
                        &[("filter", old.filter.as_str())],
                    );
                }
            }
        }
        Ok(())
    }
}

impl<R> Default for RankEngine<R>
where
    R: FilterOrdered + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Per-filter update: remove the stale value if the record was already
/// indexed here, then insert the new one. One lock scope, so the ordering
/// is strict and nothing else observes the intermediate state.
fn reindex<R: FilterOrdered>(job: IndexJob<R>, record: &Arc<R>) -> EngineResult<FilterHandle<R>> {
    let IndexJob {
        filter,
        index,
        stale,
    } = job;
    let node = {
        let mut list = index.lock().map_err(|_| EngineError::IndexPoisoned {
            filter: filter.clone(),
        })?;
        if let Some(stale) = stale {
            if let Some(old) = list.value(stale).cloned() {
                list.remove(&old);
            }
        }
        let (_, node) = list.insert_or_update(Arc::clone(record));
        node
    };
    Ok(FilterHandle {
        filter,
        index,
        node,
    })
}

/// Collapse duplicate filter names, keeping first-occurrence order, so no
/// two units of one `set` target the same index.
fn dedup_filters(filters: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(filters.len());
    filters
        .into_iter()
        .filter(|filter| seen.insert(filter.clone()))
        .collect()
}
