//! Lifetime statistics across every run and both modes.

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore, STATS_KEY};

/// Persisted lifetime counters. Never decrease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    /// Resolved rounds, right or wrong.
    pub total_rounds: u64,

    /// Rounds answered correctly.
    pub total_correct_rounds: u64,

    /// Longest streak ever reached.
    pub best_streak: u32,
}

impl LifetimeStats {
    /// Fraction of rounds answered correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            self.total_correct_rounds as f64 / self.total_rounds as f64
        }
    }
}

/// Accumulates [`LifetimeStats`] and persists after every round.
pub struct StatsTracker {
    stats: LifetimeStats,
    store: Box<dyn KeyValueStore>,
}

impl StatsTracker {
    /// Load stats, per field, over all-zero defaults.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let stats = storage::read_json_object(store.as_ref(), STATS_KEY)
            .map(|map| LifetimeStats {
                total_rounds: storage::field_or(&map, "totalRounds", 0),
                total_correct_rounds: storage::field_or(&map, "totalCorrectRounds", 0),
                best_streak: storage::field_or(&map, "bestStreak", 0),
            })
            .unwrap_or_default();

        Self { stats, store }
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> LifetimeStats {
        self.stats
    }

    /// Record one resolved round.
    ///
    /// `streak_after_round` is the run streak *after* this round was
    /// applied; it only matters for correct rounds.
    pub fn record_round(&mut self, correct: bool, streak_after_round: u32) {
        self.stats.total_rounds += 1;
        if correct {
            self.stats.total_correct_rounds += 1;
            self.stats.best_streak = self.stats.best_streak.max(streak_after_round);
        }

        if let Err(err) = storage::write_json(self.store.as_ref(), STATS_KEY, &self.stats) {
            tracing::warn!(error = %err, "failed to persist stats");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_record_round() {
        let mut tracker = StatsTracker::load(Box::new(MemoryStore::new()));

        tracker.record_round(true, 1);
        tracker.record_round(true, 2);
        tracker.record_round(false, 0);
        tracker.record_round(true, 1);

        let stats = tracker.stats();
        assert_eq!(stats.total_rounds, 4);
        assert_eq!(stats.total_correct_rounds, 3);
        assert_eq!(stats.best_streak, 2);
        assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_round_ignores_streak() {
        let mut tracker = StatsTracker::load(Box::new(MemoryStore::new()));
        tracker.record_round(false, 99);
        assert_eq!(tracker.stats().best_streak, 0);
    }

    #[test]
    fn test_persists_and_reloads() {
        let backing = MemoryStore::new();
        let mut tracker = StatsTracker::load(Box::new(backing.clone()));
        tracker.record_round(true, 5);

        let reloaded = StatsTracker::load(Box::new(backing));
        assert_eq!(reloaded.stats(), tracker.stats());
    }

    #[test]
    fn test_partial_stored_stats() {
        let backing =
            MemoryStore::with_entries([(STATS_KEY, r#"{"totalRounds":10,"bestStreak":"x"}"#)]);
        let tracker = StatsTracker::load(Box::new(backing));

        assert_eq!(
            tracker.stats(),
            LifetimeStats {
                total_rounds: 10,
                total_correct_rounds: 0,
                best_streak: 0,
            }
        );
    }

    #[test]
    fn test_accuracy_empty() {
        assert_eq!(LifetimeStats::default().accuracy(), 0.0);
    }
}
