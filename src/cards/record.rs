//! Raw character records and the normalization boundary.
//!
//! Data files have used several spellings for the same field over time
//! (`series` vs `origin`, `tier` vs `highestTier`, ...). `CharacterRecord`
//! accepts all of them; [`CharacterRecord::normalize`] turns a record into
//! a canonical [`Character`] and nothing past this point sees raw names.

use serde::Deserialize;

use super::character::{Character, CharacterId, IdentityKey};
use crate::core::TierLadder;

/// Origin used when a record has none.
pub const UNKNOWN_ORIGIN: &str = "Unknown";

/// A character record as supplied by a data provider.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CharacterRecord {
    /// Record id.
    #[serde(default, alias = "_id", alias = "slug", alias = "characterId")]
    pub id: Option<String>,

    /// Display name.
    #[serde(default, alias = "character", alias = "characterName", alias = "title")]
    pub name: Option<String>,

    /// Series.
    #[serde(default, alias = "series", alias = "franchise", alias = "verse")]
    pub origin: Option<String>,

    /// Strongest tier, when the provider already computed it.
    #[serde(
        default,
        alias = "highestTier",
        alias = "tier",
        alias = "topTier",
        alias = "top_tier"
    )]
    pub highest_tier: Option<String>,

    /// Every tier the character reaches (key, form or feat dependent).
    #[serde(default, alias = "tierList", alias = "allTiers")]
    pub tiers: Vec<String>,

    /// Short description.
    #[serde(default, alias = "description", alias = "blurb")]
    pub summary: Option<String>,

    /// Profile URL.
    #[serde(default, alias = "url", alias = "profile", alias = "wiki")]
    pub link: Option<String>,

    /// Single image URL.
    #[serde(default, alias = "img", alias = "imageUrl")]
    pub image: Option<String>,

    /// Additional image URLs.
    #[serde(default, alias = "imageUrls", alias = "gallery")]
    pub images: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CharacterRecord {
    /// Normalize into a canonical character.
    ///
    /// Returns `None` for records without a name. An explicit highest tier
    /// wins; otherwise the strongest ranked label from `tiers` is used.
    /// A missing id is derived from the identity key.
    #[must_use]
    pub fn normalize(self, ladder: &TierLadder) -> Option<Character> {
        let name = non_empty(self.name)?;
        let origin = non_empty(self.origin).unwrap_or_else(|| UNKNOWN_ORIGIN.to_string());

        let highest_tier = non_empty(self.highest_tier).or_else(|| {
            self.tiers
                .iter()
                .map(|t| t.trim())
                .filter_map(|t| ladder.index_of(t).map(|rank| (rank, t)))
                .min_by_key(|(rank, _)| *rank)
                .map(|(_, t)| t.to_string())
        });

        let id = non_empty(self.id)
            .unwrap_or_else(|| IdentityKey::new(&name, &origin).as_str().to_string());

        let mut images: Vec<String> = non_empty(self.image).into_iter().collect();
        images.extend(
            self.images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        );

        Some(Character {
            id: CharacterId::new(id),
            name,
            origin,
            highest_tier,
            summary: non_empty(self.summary),
            link: non_empty(self.link),
            images,
        })
    }
}
