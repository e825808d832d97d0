//! Core types: tier ladder, RNG, engine configuration.

pub mod config;
pub mod rng;
pub mod tier;

pub use config::{EngineConfig, DEFAULT_MAX_ATTEMPTS};
pub use rng::RoundRng;
pub use tier::{LadderError, TierLadder, STANDARD_TIERS};
