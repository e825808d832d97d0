//! Round engines.
//!
//! Two independent engines build and resolve rounds:
//!
//! - [`ClassicEngine`]: two cards, pick the stronger one.
//! - [`OddOneOutEngine`]: four cards, three share a tier, pick the odd one.
//!
//! Both follow the same lifecycle:
//!
//! ```text
//! Loading -> InRound -> AfterCorrect | AfterWrong -> InRound ...
//!               \-> Error (until restart or settings change)
//! ```
//!
//! Construction failures never propagate to the caller. They show up as
//! [`Phase::Error`], with the reason kept in
//! [`RoundEngine::last_failure`] for diagnostics.

pub mod classic;
pub mod filter;
pub mod odd_one_out;
pub mod run;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classic::{CharacterPair, ClassicEngine, ClassicOutcome, ClassicRound};
pub use filter::TierGroup;
pub use odd_one_out::{OddOneOutEngine, OddOneOutOutcome, OddOneOutRound};
pub use run::RunState;

use crate::cards::{Character, CharacterId};
use crate::settings::Settings;
use crate::stats::StatsTracker;

/// Round lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No round built yet.
    #[default]
    Loading,
    /// Cards are showing, waiting for a choice.
    InRound,
    /// The last choice was right.
    AfterCorrect,
    /// The last choice was wrong.
    AfterWrong,
    /// No valid round could be built.
    Error,
}

impl Phase {
    /// Has the current round been answered?
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Phase::AfterCorrect | Phase::AfterWrong)
    }
}

/// Why a round could not be built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundFailure {
    /// Fewer than two tiers have eligible characters.
    #[error("only {groups} tier group(s) have eligible characters, need 2")]
    TooFewTierGroups { groups: usize },

    /// No pair of populated tiers satisfies the difficulty constraint.
    #[error("no tier pair is exactly {distance} tiers apart")]
    NoTierPairAtDistance { distance: usize },

    /// The bounded sampling loop ran out of attempts.
    #[error("no valid pair after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    /// Too few distinct characters for a four-card round.
    #[error("only {eligible} eligible characters, need {required}")]
    PoolTooSmall { eligible: usize, required: usize },

    /// No tier has three members alongside another populated tier.
    #[error("no tier has enough characters for a majority")]
    NoMajorityTier,

    /// No tier besides the majority has a member.
    #[error("no tier available for the odd character")]
    NoOddTier,

    /// The final identity check found repeated characters.
    #[error("options collapsed to {distinct} distinct characters")]
    DuplicateOptions { distinct: usize },
}

/// Common interface of the round engines.
///
/// ## Implementation Notes
///
/// - `start_new_round` keeps the run history; `restart_game` clears it.
/// - `handle_choice` returns `None` (and changes nothing) for a choice
///   that cannot be applied: wrong phase, no round, or an unknown id.
pub trait RoundEngine {
    /// Result of a resolved choice.
    type Outcome;

    /// The run state (phase, streak, used characters).
    fn run(&self) -> &RunState;

    /// Mutable run state, for the provided `restart_game`.
    fn run_mut(&mut self) -> &mut RunState;

    /// Reason for the last construction failure, if the engine is in
    /// the error phase.
    fn last_failure(&self) -> Option<&RoundFailure>;

    /// Build a new round from the eligible pool.
    fn start_new_round(&mut self, settings: &Settings) -> Phase;

    /// Resolve the player's pick.
    fn handle_choice(
        &mut self,
        selected: &CharacterId,
        stats: &mut StatsTracker,
    ) -> Option<Self::Outcome>;

    /// Cards in presentation order (empty when no round is built).
    fn cards(&self) -> Vec<Arc<Character>>;

    /// Id of the card that wins the current round.
    fn answer_id(&self) -> Option<&CharacterId>;

    // === Convenience Methods ===

    /// Current phase.
    fn phase(&self) -> Phase {
        self.run().phase()
    }

    /// Current run streak.
    fn streak(&self) -> u32 {
        self.run().streak()
    }

    /// Start a fresh run and build its first round.
    fn restart_game(&mut self, settings: &Settings) -> Phase {
        self.run_mut().reset();
        self.start_new_round(settings)
    }
}
