//! The shared character pool.
//!
//! A `CharacterPool` is built once per session and then shared read-only
//! (behind an `Arc`) by both round engines. It provides lookup by id and
//! the list of series for the custom-mode menu.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::character::{Character, CharacterId};
use super::record::CharacterRecord;
use crate::core::TierLadder;

/// Immutable collection of normalized characters.
///
/// ## Example
///
/// ```
/// use vsrdle::cards::{Character, CharacterId, CharacterPool};
///
/// let pool = CharacterPool::new(vec![
///     Character::new(CharacterId::new("a"), "Alpha", "Saga").with_tier("1-A"),
/// ]);
///
/// assert_eq!(pool.get(&CharacterId::new("a")).unwrap().name, "Alpha");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharacterPool {
    characters: Vec<Arc<Character>>,
    by_id: FxHashMap<CharacterId, usize>,
}

impl CharacterPool {
    /// Build a pool from canonical characters.
    ///
    /// Panics if two characters share an id.
    #[must_use]
    pub fn new(characters: Vec<Character>) -> Self {
        let mut pool = Self::default();
        for character in characters {
            if pool.by_id.contains_key(&character.id) {
                panic!("Character with ID {} already in pool", character.id);
            }
            pool.push(character);
        }
        pool
    }

    /// Normalize raw records into a pool.
    ///
    /// Nameless records are dropped. Colliding ids get a `-2`, `-3`, ...
    /// suffix so every id in the pool stays unique.
    #[must_use]
    pub fn from_records(records: Vec<CharacterRecord>, ladder: &TierLadder) -> Self {
        let total = records.len();
        let mut pool = Self::default();

        for record in records {
            let Some(mut character) = record.normalize(ladder) else {
                continue;
            };

            if pool.contains(&character.id) {
                let base = character.id.as_str().to_string();
                let mut n = 2;
                while pool.contains(&CharacterId::new(format!("{base}-{n}"))) {
                    n += 1;
                }
                character.id = CharacterId::new(format!("{base}-{n}"));
            }

            pool.push(character);
        }

        tracing::debug!(
            records = total,
            characters = pool.len(),
            dropped = total - pool.len(),
            "normalized character records"
        );
        pool
    }

    fn push(&mut self, character: Character) {
        self.by_id.insert(character.id.clone(), self.characters.len());
        self.characters.push(Arc::new(character));
    }

    /// Get a character by id.
    #[must_use]
    pub fn get(&self, id: &CharacterId) -> Option<&Arc<Character>> {
        self.by_id.get(id).map(|&i| &self.characters[i])
    }

    /// Check if an id is in the pool.
    #[must_use]
    pub fn contains(&self, id: &CharacterId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Character>> {
        self.characters.iter()
    }

    /// Characters that have a highest tier.
    pub fn ranked(&self) -> impl Iterator<Item = &Arc<Character>> {
        self.characters.iter().filter(|c| c.is_ranked())
    }

    /// Sorted distinct origins.
    #[must_use]
    pub fn series(&self) -> Vec<String> {
        self.characters
            .iter()
            .map(|c| c.origin.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
