//! # vsrdle
//!
//! Round engine for a card-comparison trivia game about fictional
//! characters ranked on a power-tier ladder.
//!
//! ## Design Principles
//!
//! 1. **Ladder-Driven**: Strength is a character's position on an ordered
//!    tier ladder. Lower index is stronger; nothing else is compared.
//!
//! 2. **No Repeats Per Run**: A character, identified by `name::origin`,
//!    appears in at most one round per run no matter how many records it has.
//!
//! 3. **Never Stuck**: Round construction is bounded. An exhausted or
//!    over-filtered pool ends in the error phase instead of looping.
//!
//! ## Architecture
//!
//! - **Two Engines**: Classic (pick the stronger of two) and odd-one-out
//!   (find the card whose tier differs from the other three) share the
//!   pool but keep their own run state and RNG.
//!
//! - **Injected Persistence**: Settings and lifetime stats go through a
//!   `KeyValueStore`; the crate ships an in-memory store.
//!
//! ## Modules
//!
//! - `core`: Tier ladder, RNG, engine configuration
//! - `cards`: Characters, raw-record normalization, the shared pool
//! - `storage`: Key-value persistence seam
//! - `settings`: Player settings and their store
//! - `stats`: Lifetime counters
//! - `rounds`: Classic and odd-one-out engines
//! - `session`: Facade the presentation layer talks to
//! - `sim`: Self-play for exercising the engines headlessly
//! - `logging`: Subscriber setup for binaries

pub mod core;
pub mod cards;
pub mod storage;
pub mod settings;
pub mod stats;
pub mod rounds;
pub mod session;
pub mod sim;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, DEFAULT_MAX_ATTEMPTS,
    RoundRng,
    LadderError, TierLadder, STANDARD_TIERS,
};

pub use crate::cards::{Character, CharacterId, CharacterPool, CharacterRecord, IdentityKey};

pub use crate::storage::{KeyValueStore, MemoryStore, StorageError};

pub use crate::settings::{SettingChange, Settings, SettingsStore};

pub use crate::stats::{LifetimeStats, StatsTracker};

pub use crate::rounds::{
    Phase, RoundEngine, RoundFailure, RunState,
    ClassicEngine, ClassicOutcome, ClassicRound, CharacterPair,
    OddOneOutEngine, OddOneOutOutcome, OddOneOutRound,
};

pub use crate::session::{GameMode, RoundOutcome, RoundView, Session};
