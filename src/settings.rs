//! Player settings and their store.
//!
//! Settings are loaded once at startup, changed only through
//! [`SettingsStore::apply`] / [`SettingsStore::apply_all`], and persisted
//! after every change. Loading never fails: anything missing or malformed
//! in storage quietly falls back to the default for that key.

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore, SETTINGS_KEY};

/// Player-facing configuration consumed by the round engines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Exclude Tier 0; Classic pairs must be exactly 3 tiers apart.
    pub very_hard_mode: bool,

    /// Restrict the pool to `custom_series`.
    pub custom_mode: bool,

    /// Allowed origins when `custom_mode` is on. Empty means no filter.
    pub custom_series: Vec<String>,

    /// Light color theme. Presentation only.
    pub light_mode: bool,
}

impl Settings {
    /// Is the series filter in effect?
    #[must_use]
    pub fn series_filter_active(&self) -> bool {
        self.custom_mode && !self.custom_series.is_empty()
    }

    /// Does `origin` pass the series filter?
    #[must_use]
    pub fn allows_origin(&self, origin: &str) -> bool {
        !self.series_filter_active() || self.custom_series.iter().any(|s| s == origin)
    }

    /// Set very hard mode.
    #[must_use]
    pub fn with_very_hard_mode(mut self, on: bool) -> Self {
        self.very_hard_mode = on;
        self
    }

    /// Turn custom mode on with the given series.
    #[must_use]
    pub fn with_custom_series<I, S>(mut self, series: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_mode = true;
        self.custom_series = series.into_iter().map(Into::into).collect();
        self
    }

    fn merged_over_defaults(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let defaults = Self::default();
        Self {
            very_hard_mode: storage::field_or(map, "veryHardMode", defaults.very_hard_mode),
            custom_mode: storage::field_or(map, "customMode", defaults.custom_mode),
            custom_series: storage::field_or(map, "customSeries", defaults.custom_series),
            light_mode: storage::field_or(map, "lightMode", defaults.light_mode),
        }
    }
}

/// A single-key settings mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingChange {
    /// Set `very_hard_mode`.
    VeryHardMode(bool),
    /// Set `custom_mode`.
    CustomMode(bool),
    /// Replace `custom_series`.
    CustomSeries(Vec<String>),
    /// Set `light_mode`.
    LightMode(bool),
}

/// Holds the current settings and persists every change.
pub struct SettingsStore {
    settings: Settings,
    store: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Load settings, merging stored values over the defaults.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let settings = storage::read_json_object(store.as_ref(), SETTINGS_KEY)
            .map(|map| Settings::merged_over_defaults(&map))
            .unwrap_or_default();

        tracing::debug!(?settings, "settings loaded");
        Self { settings, store }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change one key and persist.
    pub fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::VeryHardMode(on) => self.settings.very_hard_mode = on,
            SettingChange::CustomMode(on) => self.settings.custom_mode = on,
            SettingChange::CustomSeries(series) => self.settings.custom_series = series,
            SettingChange::LightMode(on) => self.settings.light_mode = on,
        }
        self.persist();
    }

    /// Replace every key and persist once.
    pub fn apply_all(&mut self, settings: Settings) {
        self.settings = settings;
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = storage::write_json(self.store.as_ref(), SETTINGS_KEY, &self.settings) {
            tracing::warn!(error = %err, "failed to persist settings");
        }
    }
}
