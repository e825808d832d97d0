//! Classic mode: two cards, pick the stronger.
//!
//! A round picks two populated tiers, one unused character from each, and
//! records which one ranks higher on the ladder. In very hard mode the two
//! tiers must be exactly [`VERY_HARD_DISTANCE`] steps apart, not merely
//! at least that far.

use std::sync::Arc;

use super::filter::{self, TierGroup};
use super::{Phase, RoundEngine, RoundFailure, RunState};
use crate::cards::{Character, CharacterId, CharacterPool};
use crate::core::{EngineConfig, RoundRng, TierLadder};
use crate::settings::Settings;
use crate::stats::StatsTracker;

/// Required tier distance between the two cards in very hard mode.
pub const VERY_HARD_DISTANCE: usize = 3;

/// The two cards of a Classic round, in presentation order.
#[derive(Clone, Debug)]
pub struct CharacterPair {
    /// Left card.
    pub left: Arc<Character>,
    /// Right card.
    pub right: Arc<Character>,
}

impl CharacterPair {
    /// Is `id` one of the two cards?
    #[must_use]
    pub fn contains(&self, id: &CharacterId) -> bool {
        self.left.id == *id || self.right.id == *id
    }
}

/// Current Classic round.
#[derive(Clone, Debug, Default)]
pub struct ClassicRound {
    /// The pair on the table, `None` before the first round or on error.
    pub pair: Option<CharacterPair>,
    /// Id of the stronger card.
    pub correct_id: Option<CharacterId>,
}

/// Result of a resolved Classic choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicOutcome {
    /// Did the player pick the stronger card?
    pub correct: bool,
    /// The card the player picked.
    pub selected_id: CharacterId,
    /// The stronger card.
    pub correct_id: CharacterId,
    /// Run streak after this round.
    pub streak: u32,
    /// Phase after this round.
    pub phase: Phase,
}

/// Two-card round engine.
#[derive(Clone, Debug)]
pub struct ClassicEngine {
    pool: Arc<CharacterPool>,
    ladder: Arc<TierLadder>,
    config: EngineConfig,
    rng: RoundRng,
    run: RunState,
    round: ClassicRound,
    last_failure: Option<RoundFailure>,
}

impl ClassicEngine {
    /// Create an engine in the `Loading` phase.
    #[must_use]
    pub fn new(pool: Arc<CharacterPool>, ladder: Arc<TierLadder>, config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(RoundRng::from_entropy, RoundRng::new);
        Self {
            pool,
            ladder,
            config,
            rng,
            run: RunState::new(),
            round: ClassicRound::default(),
            last_failure: None,
        }
    }

    /// The current round.
    #[must_use]
    pub fn round(&self) -> &ClassicRound {
        &self.round
    }

    /// Candidate tier pairs, as indices into `groups`.
    ///
    /// `groups` is ordered by rank, so in every pair the first group is
    /// the stronger tier.
    fn candidate_pairs(groups: &[TierGroup<'_>], very_hard: bool) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                let distance = groups[j].rank - groups[i].rank;
                let allowed = if very_hard {
                    distance == VERY_HARD_DISTANCE
                } else {
                    distance > 0
                };
                if allowed {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn build_round(&mut self, settings: &Settings) -> Result<ClassicRound, RoundFailure> {
        let pool = Arc::clone(&self.pool);
        let eligible =
            filter::eligible_characters(&pool, &self.ladder, settings, &self.run, false);
        let groups = filter::group_by_tier(&eligible, &self.ladder);
        if groups.len() < 2 {
            return Err(RoundFailure::TooFewTierGroups {
                groups: groups.len(),
            });
        }

        let candidates = Self::candidate_pairs(&groups, settings.very_hard_mode);
        if candidates.is_empty() {
            // two populated groups always form a pair outside very hard mode
            return Err(if settings.very_hard_mode {
                RoundFailure::NoTierPairAtDistance {
                    distance: VERY_HARD_DISTANCE,
                }
            } else {
                RoundFailure::TooFewTierGroups {
                    groups: groups.len(),
                }
            });
        }

        let run = &self.run;
        let unused = |c: &&Arc<Character>| !run.is_used(&c.identity_key());

        for attempt in 1..=self.config.max_attempts {
            let (a, b) = candidates[self.rng.gen_index(candidates.len())];

            let Some(&first) = self.rng.choose_where(&groups[a].members, unused) else {
                continue;
            };
            let Some(&second) = self.rng.choose_where(&groups[b].members, unused) else {
                continue;
            };
            let Some(stronger) = self.ladder.compare_strength(first, second) else {
                continue;
            };
            let correct_id = stronger.id.clone();

            let (left, right) = if self.rng.gen_bool(0.5) {
                (first, second)
            } else {
                (second, first)
            };

            tracing::debug!(
                attempt,
                left = %left.id,
                right = %right.id,
                stronger_tier = groups[a].label,
                weaker_tier = groups[b].label,
                "classic round built"
            );

            return Ok(ClassicRound {
                pair: Some(CharacterPair {
                    left: Arc::clone(left),
                    right: Arc::clone(right),
                }),
                correct_id: Some(correct_id),
            });
        }

        Err(RoundFailure::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

impl RoundEngine for ClassicEngine {
    type Outcome = ClassicOutcome;

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
                tracing::warn!(%failure, used = self.run.used_count(), "classic round construction failed");
                self.round = ClassicRound::default();
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
    ) -> Option<ClassicOutcome> {
        if self.run.phase() != Phase::InRound {
            return None;
        }
        let pair = self.round.pair.as_ref()?;
        if !pair.contains(selected) {
            tracing::debug!(%selected, "choice is not on the table");
            return None;
        }
        let correct_id = self.round.correct_id.clone()?;

        self.run
            .consume([pair.left.identity_key(), pair.right.identity_key()]);
        let correct = *selected == correct_id;
        let streak = self.run.resolve(correct);
        stats.record_round(correct, streak);

        Some(ClassicOutcome {
            correct,
            selected_id: selected.clone(),
            correct_id,
            streak,
            phase: self.run.phase(),
        })
    }

    fn cards(&self) -> Vec<Arc<Character>> {
        self.round
            .pair
            .as_ref()
            .map(|p| vec![Arc::clone(&p.left), Arc::clone(&p.right)])
            .unwrap_or_default()
    }

    fn answer_id(&self) -> Option<&CharacterId> {
        self.round.correct_id.as_ref()
    }
}
