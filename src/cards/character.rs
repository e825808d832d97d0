//! Canonical character records.
//!
//! `Character` is the only shape the round engines ever see. Raw data with
//! its assorted historical field names is normalized into this type by
//! [`CharacterRecord`](super::CharacterRecord) before a pool is built.

use serde::{Deserialize, Serialize};

/// Unique identifier for a character record.
///
/// Two records can describe the same character (for example one entry per
/// tier), so ids are *not* the identity used for no-repeat tracking; see
/// [`IdentityKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    /// Create a new character ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The "same character" key: `name::origin`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Build the key for a name and origin.
    #[must_use]
    pub fn new(name: &str, origin: &str) -> Self {
        Self(format!("{name}::{origin}"))
    }

    /// Get the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A comparable entity tagged with its strongest tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Unique record id.
    pub id: CharacterId,

    /// Display name.
    pub name: String,

    /// Series the character comes from; also the custom-mode filter key.
    pub origin: String,

    /// Strongest tier label attained, `None` if unranked.
    pub highest_tier: Option<String>,

    /// Short description for the card back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Link to the character's profile page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Image URLs, best candidate first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Character {
    /// Create an unranked character.
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            origin: origin.into(),
            highest_tier: None,
            summary: None,
            link: None,
            images: Vec::new(),
        }
    }

    /// Set the highest tier.
    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.highest_tier = Some(tier.into());
        self
    }

    /// Set or clear the highest tier.
    #[must_use]
    pub fn with_tier_opt(mut self, tier: Option<&str>) -> Self {
        self.highest_tier = tier.map(str::to_string);
        self
    }

    /// Set the summary text.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the profile link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Append an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// The de-duplication key for this character.
    #[must_use]
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.name, &self.origin)
    }

    /// Does this character have a tier at all?
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.highest_tier.is_some()
    }
}
