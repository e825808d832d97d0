//! Per-round pool filtering and tier grouping.
//!
//! Each engine derives its own filtered view of the shared pool at the
//! start of every round:
//!
//! 1. Very hard mode drops the ladder's top tier.
//! 2. Custom mode with a non-empty series list keeps only those origins.
//! 3. Characters already shown this run are dropped.
//! 4. Optionally, one record per identity key is kept.
//!
//! Characters without a ranked tier never pass.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::RunState;
use crate::cards::{Character, CharacterPool};
use crate::core::TierLadder;
use crate::settings::Settings;

/// Characters sharing one highest tier.
#[derive(Clone, Debug)]
pub struct TierGroup<'a> {
    /// Tier label.
    pub label: &'a str,
    /// Ladder rank of `label`.
    pub rank: usize,
    /// Members in pool order.
    pub members: Vec<&'a Arc<Character>>,
}

impl TierGroup<'_> {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Has no members?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Filter the pool for the current settings and run.
#[must_use]
pub fn eligible_characters<'a>(
    pool: &'a CharacterPool,
    ladder: &TierLadder,
    settings: &Settings,
    run: &RunState,
    dedupe_identity: bool,
) -> Vec<&'a Arc<Character>> {
    let top = ladder.top();
    let mut seen = FxHashSet::default();

    pool.iter()
        .filter(|c| ladder.rank_of(c).is_some())
        .filter(|c| !(settings.very_hard_mode && c.highest_tier.as_deref() == Some(top)))
        .filter(|c| settings.allows_origin(&c.origin))
        .filter(|c| !run.is_used(&c.identity_key()))
        .filter(|c| !dedupe_identity || seen.insert(c.identity_key()))
        .collect()
}

/// Partition characters by highest tier, strongest tier first.
///
/// Unranked characters are skipped.
#[must_use]
pub fn group_by_tier<'a>(
    characters: &[&'a Arc<Character>],
    ladder: &TierLadder,
) -> Vec<TierGroup<'a>> {
    let mut slots: FxHashMap<usize, usize> = FxHashMap::default();
    let mut groups: Vec<TierGroup<'a>> = Vec::new();

    for &character in characters {
        let Some(label) = character.highest_tier.as_deref() else {
            continue;
        };
        let Some(rank) = ladder.index_of(label) else {
            continue;
        };

        let slot = *slots.entry(rank).or_insert_with(|| {
            groups.push(TierGroup {
                label,
                rank,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(character);
    }

    groups.sort_by_key(|g| g.rank);
    groups
}
