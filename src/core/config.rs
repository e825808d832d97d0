//! Engine configuration.
//!
//! Both round engines take an `EngineConfig` at construction. Gameplay
//! settings that the player can change mid-session (difficulty, series
//! filter) live in [`Settings`](crate::settings::Settings) instead.

use serde::{Deserialize, Serialize};

/// Sampling attempts before a Classic round gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;

/// Round engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed. `None` seeds from entropy, so each session differs.
    pub seed: Option<u64>,

    /// Bounded retry cap for the Classic sampling loop.
    /// Never unbounded: an exhausted pool must end in the error phase.
    pub max_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom attempt cap (minimum 1).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Derive the config for a second engine so that two engines built
    /// from one seeded config do not share a random stream.
    #[must_use]
    pub fn derived(&self, salt: u64) -> Self {
        Self {
            seed: self
                .seed
                .map(|seed| seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))),
            max_attempts: self.max_attempts,
        }
    }
}
