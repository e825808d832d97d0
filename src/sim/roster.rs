//! Generated character rosters.

use crate::cards::record::UNKNOWN_ORIGIN;
use crate::cards::{Character, CharacterId};
use crate::core::TierLadder;

/// Build `per_tier` characters for every ladder tier.
///
/// Origins are assigned round-robin so series filters have something to
/// bite on. Ids are `"{rank}-{n}"` and names are `"{tier} #{n}"`, both
/// unique, so the output is always a valid pool.
#[must_use]
pub fn synthetic_roster(ladder: &TierLadder, per_tier: usize, origins: &[&str]) -> Vec<Character> {
    let mut roster = Vec::with_capacity(ladder.len() * per_tier);

    for (rank, label) in ladder.iter().enumerate() {
        for n in 0..per_tier {
            let slot = rank * per_tier + n;
            let origin = if origins.is_empty() {
                UNKNOWN_ORIGIN
            } else {
                origins[slot % origins.len()]
            };
            roster.push(
                Character::new(
                    CharacterId::new(format!("{rank}-{n}")),
                    format!("{label} #{}", n + 1),
                    origin,
                )
                .with_tier(label),
            );
        }
    }

    roster
}
