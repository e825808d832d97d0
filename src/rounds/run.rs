//! Per-run state: phase, streak and the no-repeat history.

use rustc_hash::FxHashSet;

use super::Phase;
use crate::cards::IdentityKey;

/// State scoped to one run (between restarts) of one engine.
///
/// `used` collects the identity key of every character that has appeared
/// in a resolved round. It only ever grows until [`RunState::reset`].
#[derive(Clone, Debug, Default)]
pub struct RunState {
    phase: Phase,
    streak: u32,
    used: FxHashSet<IdentityKey>,
}

impl RunState {
    /// A fresh run in the `Loading` phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consecutive correct answers in this run.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Has this character already been shown in a resolved round?
    #[must_use]
    pub fn is_used(&self, key: &IdentityKey) -> bool {
        self.used.contains(key)
    }

    /// Number of distinct characters consumed this run.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Iterate consumed identity keys.
    pub fn used_keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.used.iter()
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Mark characters as shown.
    pub(crate) fn consume<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = IdentityKey>,
    {
        self.used.extend(keys);
    }

    /// Apply a resolved answer; returns the streak after the round.
    pub(crate) fn resolve(&mut self, correct: bool) -> u32 {
        if correct {
            self.streak += 1;
            self.phase = Phase::AfterCorrect;
        } else {
            self.streak = 0;
            self.phase = Phase::AfterWrong;
        }
        self.streak
    }

    /// Start a new run: clear history and streak.
    pub(crate) fn reset(&mut self) {
        self.used.clear();
        self.streak = 0;
        self.phase = Phase::InRound;
    }
}
