//! Rank Invariant Tests
//!
//! - A record's rank equals the count of records strictly ordered before it
//! - Re-setting an unchanged record changes nothing observable
//! - Filters are independent ranked universes

use rankset::engine::RankEngine;
use rankset::index::RankOrder;
use rankset::record::FilterOrdered;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone)]
struct Entry {
    id: Uuid,
    score: i64,
    groups: Vec<String>,
}

impl RankOrder for Entry {
    fn precedes(&self, other: &Self) -> bool {
        if self.score == other.score {
            return self.id.as_bytes()[0] < other.id.as_bytes()[0];
        }
        self.score > other.score
    }

    fn order_eq(&self, other: &Self) -> bool {
        self.score == other.score && self.id.as_bytes()[0] == other.id.as_bytes()[0]
    }
}

impl FilterOrdered for Entry {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }

    fn filters(&self) -> Vec<String> {
        self.groups.clone()
    }
}

fn entry(seed: u8, score: i64, groups: &[&str]) -> Entry {
    Entry {
        id: Uuid::from_bytes([seed; 16]),
        score,
        groups: groups.iter().map(|group| group.to_string()).collect(),
    }
}

fn key(seed: u8) -> Uuid {
    Uuid::from_bytes([seed; 16])
}

// =============================================================================
// Rank Consistency
// =============================================================================

/// Rank equals the number of records strictly ordered before the record.
#[test]
fn test_rank_counts_strict_predecessors() {
    let mut engine = RankEngine::new();
    let scores = [40, 10, 30, 50, 20];
    for (seed, score) in scores.iter().enumerate() {
        engine.set(entry(seed as u8 + 1, *score, &["AA"])).unwrap();
    }

    for (seed, score) in scores.iter().enumerate() {
        let preceding = scores.iter().filter(|other| *other > score).count();
        let row = engine.get(&key(seed as u8 + 1), "AA").unwrap().unwrap();
        assert_eq!(row.rank, preceding, "score {}", score);
        assert_eq!(row.total, scores.len());
    }
}

/// Equal scores fall back to the key-byte tie-break.
#[test]
fn test_equal_scores_tie_break_on_key_byte() {
    let mut engine = RankEngine::new();
    engine.set(entry(9, 100, &["AA"])).unwrap();
    engine.set(entry(3, 100, &["AA"])).unwrap();
    engine.set(entry(6, 100, &["AA"])).unwrap();

    assert_eq!(engine.get(&key(3), "AA").unwrap().unwrap().rank, 0);
    assert_eq!(engine.get(&key(6), "AA").unwrap().unwrap().rank, 1);
    assert_eq!(engine.get(&key(9), "AA").unwrap().unwrap().rank, 2);
}

// =============================================================================
// Idempotent Re-Set
// =============================================================================

/// Re-submitting an unchanged record leaves every shared filter unchanged.
#[test]
fn test_reset_unchanged_record_is_idempotent() {
    let mut engine = RankEngine::new();
    engine.set(entry(1, 30, &["AA", "BB"])).unwrap();
    engine.set(entry(2, 20, &["AA"])).unwrap();
    engine.set(entry(3, 10, &["BB"])).unwrap();

    let before_aa = engine.get(&key(1), "AA").unwrap().unwrap();
    let before_bb = engine.get(&key(1), "BB").unwrap().unwrap();

    engine.set(entry(1, 30, &["AA", "BB"])).unwrap();

    let after_aa = engine.get(&key(1), "AA").unwrap().unwrap();
    let after_bb = engine.get(&key(1), "BB").unwrap().unwrap();
    assert_eq!(after_aa.rank, before_aa.rank);
    assert_eq!(after_aa.total, before_aa.total);
    assert_eq!(after_bb.rank, before_bb.rank);
    assert_eq!(after_bb.total, before_bb.total);
    assert_eq!(engine.size("AA").unwrap(), 2);
    assert_eq!(engine.size("BB").unwrap(), 2);
}

// =============================================================================
// Multi-Filter Isolation
// =============================================================================

/// A record's ranks in different filters are independent.
#[test]
fn test_independent_ranks_per_filter() {
    let mut engine = RankEngine::new();
    // AA holds a stronger record, BB a weaker one.
    engine.set(entry(1, 90, &["AA"])).unwrap();
    engine.set(entry(2, 10, &["BB"])).unwrap();
    engine.set(entry(3, 50, &["AA", "BB"])).unwrap();

    assert_eq!(engine.get(&key(3), "AA").unwrap().unwrap().rank, 1);
    assert_eq!(engine.get(&key(3), "BB").unwrap().unwrap().rank, 0);
}

/// Updating a shared record's score re-ranks it consistently everywhere.
#[test]
fn test_update_reranks_all_memberships() {
    let mut engine = RankEngine::new();
    engine.set(entry(1, 90, &["AA"])).unwrap();
    engine.set(entry(2, 10, &["BB"])).unwrap();
    engine.set(entry(3, 50, &["AA", "BB"])).unwrap();

    engine.set(entry(3, 5, &["AA", "BB"])).unwrap();

    assert_eq!(engine.get(&key(3), "AA").unwrap().unwrap().rank, 1);
    assert_eq!(engine.get(&key(3), "BB").unwrap().unwrap().rank, 1);
    assert_eq!(engine.size("AA").unwrap(), 2);
    assert_eq!(engine.size("BB").unwrap(), 2);
}

/// Mutating records in one filter never changes ranks in a disjoint one.
#[test]
fn test_disjoint_filters_never_interact() {
    let mut engine = RankEngine::new();
    engine.set(entry(1, 30, &["AA"])).unwrap();
    engine.set(entry(2, 20, &["AA"])).unwrap();
    engine.set(entry(3, 99, &["BB"])).unwrap();
    engine.set(entry(4, 1, &["BB"])).unwrap();

    let bb_before: Vec<usize> = [3, 4]
        .iter()
        .map(|seed| engine.get(&key(*seed), "BB").unwrap().unwrap().rank)
        .collect();

    // Churn AA: update, overtake, update again.
    engine.set(entry(2, 40, &["AA"])).unwrap();
    engine.set(entry(1, 50, &["AA"])).unwrap();

    let bb_after: Vec<usize> = [3, 4]
        .iter()
        .map(|seed| engine.get(&key(*seed), "BB").unwrap().unwrap().rank)
        .collect();
    assert_eq!(bb_before, bb_after);
    assert_eq!(engine.size("BB").unwrap(), 2);
}
