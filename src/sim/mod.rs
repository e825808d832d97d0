//! Headless self-play for exercising the round engines.
//!
//! ## Overview
//!
//! - **ChoicePolicy**: decides which card a simulated player picks
//! - **SelfPlay**: drives a [`Session`](crate::session::Session) for N rounds
//! - **synthetic_roster**: deterministic characters spread over a ladder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vsrdle::sim::{synthetic_roster, AlwaysCorrect, SelfPlay, SelfPlayConfig};
//!
//! let ladder = TierLadder::standard();
//! let pool = CharacterPool::new(synthetic_roster(&ladder, 4, &["Saga", "Epic"]));
//! let mut session = Session::with_store(pool, ladder, MemoryStore::new(), EngineConfig::default());
//!
//! let report = SelfPlay::new(SelfPlayConfig::default().with_rounds(100))
//!     .run(&mut session, &mut AlwaysCorrect);
//! ```

pub mod policy;
pub mod roster;
pub mod self_play;

pub use policy::{AlwaysCorrect, AlwaysWrong, ChoicePolicy, RandomChoice};
pub use roster::synthetic_roster;
pub use self_play::{SelfPlay, SelfPlayConfig, SimulationReport};
