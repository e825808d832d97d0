//! The power tier ladder.
//!
//! Tiers are totally ordered by position: index 0 is the strongest tier
//! ("Tier 0"), and every step down the ladder is weaker. Comparisons
//! therefore run backwards from intuition: the *lower* index wins.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Character;

/// Built-in ladder, strongest first.
pub const STANDARD_TIERS: &[&str] = &[
    "Tier 0", "High 1-A", "1-A", "Low 1-A", "High 1-B", "1-B", "Low 1-B", "High 1-C", "1-C",
    "Low 1-C", "2-A", "2-B", "2-C", "Low 2-C", "High 3-A", "3-A", "3-B", "3-C", "4-A", "4-B",
    "High 4-C", "4-C", "5-A", "5-B", "5-C", "Low 5-C", "High 6-A", "6-A", "6-B", "High 6-C",
    "6-C", "High 7-A", "7-A", "7-B", "7-C", "8-A", "8-B", "High 8-C", "8-C", "9-A", "9-B",
    "9-C", "10-A", "10-B", "10-C", "11-A", "11-B", "11-C",
];

/// Errors building a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    /// A ladder needs at least one tier.
    #[error("tier ladder is empty")]
    Empty,

    /// Labels must be unique.
    #[error("duplicate tier label: {0}")]
    DuplicateLabel(String),
}

/// Ordered, immutable list of tier labels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TierLadder {
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl TierLadder {
    /// Build a ladder from labels ordered strongest first.
    pub fn new<I, S>(labels: I) -> Result<Self, LadderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(LadderError::Empty);
        }

        let mut index = FxHashMap::default();
        for (rank, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), rank).is_some() {
                return Err(LadderError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { labels, index })
    }

    /// The built-in ladder.
    #[must_use]
    pub fn standard() -> Self {
        let labels: Vec<String> = STANDARD_TIERS.iter().map(|s| (*s).to_string()).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(rank, label)| (label.clone(), rank))
            .collect();
        Self { labels, index }
    }

    /// Rank of a label, or `None` if the label is unranked.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Rank of a character's highest tier.
    #[must_use]
    pub fn rank_of(&self, character: &Character) -> Option<usize> {
        character
            .highest_tier
            .as_deref()
            .and_then(|tier| self.index_of(tier))
    }

    /// Is `label` on the ladder?
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// The strongest label ("Tier 0" on the standard ladder).
    #[must_use]
    pub fn top(&self) -> &str {
        &self.labels[0]
    }

    /// Label at a rank.
    #[must_use]
    pub fn label(&self, rank: usize) -> Option<&str> {
        self.labels.get(rank).map(String::as_str)
    }

    /// Rank distance between two labels, `None` if either is unranked.
    #[must_use]
    pub fn distance(&self, a: &str, b: &str) -> Option<usize> {
        Some(self.index_of(a)?.abs_diff(self.index_of(b)?))
    }

    /// The stronger of two characters (lower rank index wins).
    ///
    /// Returns `None` if either character is unranked. On equal rank the
    /// first argument is returned.
    #[must_use]
    pub fn compare_strength<'a>(
        &self,
        a: &'a Character,
        b: &'a Character,
    ) -> Option<&'a Character> {
        let rank_a = self.rank_of(a)?;
        let rank_b = self.rank_of(b)?;
        if rank_b < rank_a {
            Some(b)
        } else {
            Some(a)
        }
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; ladders are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate labels strongest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for TierLadder {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<String>> for TierLadder {
    type Error = LadderError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<TierLadder> for Vec<String> {
    fn from(ladder: TierLadder) -> Self {
        ladder.labels
    }
}
