//! Odd-one-out mode: four cards, three share a tier.
//!
//! The pool is de-duplicated by identity before grouping, so the same
//! character can never fill two of the four slots through different
//! records. Very hard mode only removes Tier 0 here; the majority and odd
//! tiers can be any distance apart.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::filter::{self, TierGroup};
use super::{Phase, RoundEngine, RoundFailure, RunState};
use crate::cards::{Character, CharacterId, CharacterPool};
use crate::core::{EngineConfig, RoundRng, TierLadder};
use crate::settings::Settings;
use crate::stats::StatsTracker;

/// Cards per round.
pub const OPTION_COUNT: usize = 4;

/// Cards drawn from the majority tier.
pub const MAJORITY_SIZE: usize = 3;

/// The four cards of a round.
pub type Options = SmallVec<[Arc<Character>; OPTION_COUNT]>;

/// Current odd-one-out round.
#[derive(Clone, Debug, Default)]
pub struct OddOneOutRound {
    /// Cards in presentation order; empty before the first round or on error.
    pub options: Options,
    /// Id of the card whose tier differs.
    pub odd_id: Option<CharacterId>,
}

/// Result of a resolved odd-one-out choice.
#[derive(Clone, Debug)]
pub struct OddOneOutOutcome {
    /// Did the player find the odd card?
    pub correct: bool,
    /// The card the player picked.
    pub selected_id: CharacterId,
    /// The odd card.
    pub odd_id: CharacterId,
    /// All four cards, in presentation order.
    pub options: Options,
    /// Run streak after this round.
    pub streak: u32,
    /// Phase after this round.
    pub phase: Phase,
}

/// Four-card round engine.
#[derive(Clone, Debug)]
pub struct OddOneOutEngine {
    pool: Arc<CharacterPool>,
    ladder: Arc<TierLadder>,
    rng: RoundRng,
    run: RunState,
    round: OddOneOutRound,
    last_failure: Option<RoundFailure>,
}

impl OddOneOutEngine {
    /// Create an engine in the `Loading` phase.
    ///
    /// Only the seed of `config` is used; this mode has no retry loop.
    #[must_use]
    pub fn new(pool: Arc<CharacterPool>, ladder: Arc<TierLadder>, config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(RoundRng::from_entropy, RoundRng::new);
        Self {
            pool,
            ladder,
            rng,
            run: RunState::new(),
            round: OddOneOutRound::default(),
            last_failure: None,
        }
    }

    /// The current round.
    #[must_use]
    pub fn round(&self) -> &OddOneOutRound {
        &self.round
    }

    /// Groups that can supply the three matching cards.
    fn majority_candidates(groups: &[TierGroup<'_>]) -> Vec<usize> {
        (0..groups.len())
            .filter(|&i| groups[i].len() >= MAJORITY_SIZE)
            .filter(|&i| {
                groups
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != i && !other.is_empty())
            })
            .collect()
    }

    fn build_round(&mut self, settings: &Settings) -> Result<OddOneOutRound, RoundFailure> {
        let pool = Arc::clone(&self.pool);
        let eligible = filter::eligible_characters(&pool, &self.ladder, settings, &self.run, true);
        if eligible.len() < OPTION_COUNT {
            return Err(RoundFailure::PoolTooSmall {
                eligible: eligible.len(),
                required: OPTION_COUNT,
            });
        }

        let groups = filter::group_by_tier(&eligible, &self.ladder);
        if groups.len() < 2 {
            return Err(RoundFailure::TooFewTierGroups {
                groups: groups.len(),
            });
        }

        let majorities = Self::majority_candidates(&groups);
        if majorities.is_empty() {
            return Err(RoundFailure::NoMajorityTier);
        }
        let majority = majorities[self.rng.gen_index(majorities.len())];
        let trio = self.rng.sample(&groups[majority].members, MAJORITY_SIZE);

        let odd_tiers: Vec<usize> = (0..groups.len())
            .filter(|&i| i != majority && !groups[i].is_empty())
            .collect();
        if odd_tiers.is_empty() {
            return Err(RoundFailure::NoOddTier);
        }
        let odd_group = odd_tiers[self.rng.gen_index(odd_tiers.len())];
        let odd = *self
            .rng
            .choose(&groups[odd_group].members)
            .ok_or(RoundFailure::NoOddTier)?;

        let mut options: Options = trio.into_iter().map(|&c| Arc::clone(c)).collect();
        options.push(Arc::clone(odd));
        self.rng.shuffle(&mut options);

        let mut seen = FxHashSet::default();
        options.retain(|c| seen.insert(c.identity_key()));
        if options.len() < OPTION_COUNT {
            return Err(RoundFailure::DuplicateOptions {
                distinct: options.len(),
            });
        }

        tracing::debug!(
            majority_tier = groups[majority].label,
            odd_tier = groups[odd_group].label,
            odd = %odd.id,
            "odd-one-out round built"
        );

        Ok(OddOneOutRound {
            options,
            odd_id: Some(odd.id.clone()),
        })
    }
}

impl RoundEngine for OddOneOutEngine {
    type Outcome = OddOneOutOutcome;

    fn run(&self) -> &RunState {
        &self.run
    }

    fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    fn last_failure(&self) -> Option<&RoundFailure> {
        self.last_failure.as_ref()
    }

    fn start_new_round(&mut self, settings: &Settings) -> Phase {
        match self.build_round(settings) {
            Ok(round) => {
                self.round = round;
                self.last_failure = None;
                self.run.set_phase(Phase::InRound);
            }
            Err(failure) => {
                tracing::warn!(%failure, used = self.run.used_count(), "odd-one-out round construction failed");
                self.round = OddOneOutRound::default();
                self.last_failure = Some(failure);
                self.run.set_phase(Phase::Error);
            }
        }
        self.run.phase()
    }

    fn handle_choice(
        &mut self,
        selected: &CharacterId,
        stats: &mut StatsTracker,
    ) -> Option<OddOneOutOutcome> {
        if self.run.phase() != Phase::InRound || self.round.options.len() != OPTION_COUNT {
            return None;
        }
        if !self.round.options.iter().any(|c| c.id == *selected) {
            tracing::debug!(%selected, "choice is not on the table");
            return None;
        }
        let odd_id = self.round.odd_id.clone()?;

        self.run
            .consume(self.round.options.iter().map(|c| c.identity_key()));
        let correct = *selected == odd_id;
        let streak = self.run.resolve(correct);
        stats.record_round(correct, streak);

        Some(OddOneOutOutcome {
            correct,
            selected_id: selected.clone(),
            odd_id,
            options: self.round.options.clone(),
            streak,
            phase: self.run.phase(),
        })
    }

    fn cards(&self) -> Vec<Arc<Character>> {
        self.round.options.to_vec()
    }

    fn answer_id(&self) -> Option<&CharacterId> {
        self.round.odd_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ladder() -> Arc<TierLadder> {
        Arc::new(TierLadder::new(["Tier 0", "A", "B", "C"]).unwrap())
    }

    fn c(id: &str, tier: &str) -> Character {
        Character::new(CharacterId::new(id), id, "Saga").with_tier(tier)
    }

    fn engine(chars: Vec<Character>, seed: u64) -> OddOneOutEngine {
        OddOneOutEngine::new(
            Arc::new(CharacterPool::new(chars)),
            ladder(),
            EngineConfig::default().with_seed(seed),
        )
    }

    #[test]
    fn test_round_shape() {
        let mut engine = engine(
            vec![c("a1", "A"), c("a2", "A"), c("a3", "A"), c("b1", "B"), c("b2", "B")],
            5,
        );
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::InRound);

        let cards = engine.cards();
        assert_eq!(cards.len(), 4);
        let odd = engine.answer_id().unwrap();
        assert!(odd.as_str().starts_with('b'));
        assert_eq!(
            cards.iter().filter(|c| c.highest_tier.as_deref() == Some("A")).count(),
            3
        );
    }

    #[test]
    fn test_pool_too_small() {
        let mut engine = engine(vec![c("a1", "A"), c("a2", "A"), c("b1", "B")], 1);
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);
        assert_eq!(
            engine.last_failure(),
            Some(&RoundFailure::PoolTooSmall {
                eligible: 3,
                required: 4
            })
        );
    }

    #[test]
    fn test_no_majority_tier() {
        let mut engine = engine(
            vec![c("a1", "A"), c("a2", "A"), c("b1", "B"), c("b2", "B")],
            1,
        );
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);
        assert_eq!(engine.last_failure(), Some(&RoundFailure::NoMajorityTier));
    }

    #[test]
    fn test_duplicate_records_count_once() {
        let mut engine = engine(
            vec![
                Character::new(CharacterId::new("x1"), "X", "Saga").with_tier("A"),
                Character::new(CharacterId::new("x2"), "X", "Saga").with_tier("A"),
                c("a2", "A"),
                c("a3", "A"),
                c("b1", "B"),
            ],
            2,
        );
        // five records, four distinct characters: X, a2, a3 in A and b1 in B
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::InRound);

        let cards = engine.cards();
        assert_eq!(cards.iter().filter(|c| c.name == "X").count(), 1);
        assert_eq!(engine.answer_id(), Some(&CharacterId::new("b1")));
    }

    #[test]
    fn test_choice_consumes_all_four() {
        let mut engine = engine(
            vec![c("a1", "A"), c("a2", "A"), c("a3", "A"), c("b1", "B"), c("c1", "C")],
            9,
        );
        let mut stats = StatsTracker::load(Box::new(MemoryStore::new()));
        engine.start_new_round(&Settings::default());

        let odd = engine.answer_id().cloned().unwrap();
        let outcome = engine.handle_choice(&odd, &mut stats).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.options.len(), 4);
        assert_eq!(engine.run().used_count(), 4);

        assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);
    }

    #[test]
    fn test_unknown_choice_is_noop() {
        let mut engine = engine(
            vec![c("a1", "A"), c("a2", "A"), c("a3", "A"), c("b1", "B")],
            4,
        );
        let mut stats = StatsTracker::load(Box::new(MemoryStore::new()));
        engine.start_new_round(&Settings::default());

        assert!(engine.handle_choice(&CharacterId::new("nope"), &mut stats).is_none());
        assert_eq!(engine.phase(), Phase::InRound);
        assert_eq!(engine.run().used_count(), 0);
    }
}
