//! Self-play loop over a session.

use serde::{Deserialize, Serialize};

use super::policy::ChoicePolicy;
use crate::core::RoundRng;
use crate::rounds::Phase;
use crate::session::{GameMode, Session};

/// Configuration for self-play.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Rounds to play.
    pub rounds: u32,

    /// Restart the run after a construction failure instead of stopping.
    pub restart_on_failure: bool,

    /// Seed for the policy RNG.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            restart_on_failure: false,
            seed: 0,
        }
    }
}

impl SelfPlayConfig {
    /// Create a new self-play config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Restart after construction failures.
    #[must_use]
    pub fn with_restart_on_failure(mut self, restart: bool) -> Self {
        self.restart_on_failure = restart;
        self
    }

    /// Set the policy seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Aggregate result of a simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Mode that was played.
    pub mode: GameMode,
    /// Policy that played.
    pub policy: String,
    /// Rounds resolved.
    pub rounds_played: u32,
    /// Rounds answered correctly.
    pub rounds_correct: u32,
    /// Rounds that could not be built.
    pub construction_failures: u32,
    /// Longest streak seen.
    pub best_streak: u32,
}

impl SimulationReport {
    /// Fraction of rounds answered correctly, or 0 with no rounds.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            f64::from(self.rounds_correct) / f64::from(self.rounds_played)
        }
    }
}

/// Runs simulated rounds on a session.
#[derive(Clone, Debug, Default)]
pub struct SelfPlay {
    config: SelfPlayConfig,
}

impl SelfPlay {
    /// Create a new self-play driver.
    #[must_use]
    pub fn new(config: SelfPlayConfig) -> Self {
        Self { config }
    }

    /// Play up to `config.rounds` rounds in the session's active mode.
    ///
    /// The run starts fresh. Without `restart_on_failure` the simulation
    /// ends at the first round that cannot be built; with it the run is
    /// restarted once per failure, and a failed restart ends it.
    pub fn run(&self, session: &mut Session, policy: &mut dyn ChoicePolicy) -> SimulationReport {
        let mut rng = RoundRng::new(self.config.seed);
        let mut report = SimulationReport {
            mode: session.mode(),
            policy: policy.name().to_string(),
            ..SimulationReport::default()
        };

        let mut phase = session.restart_game();

        while report.rounds_played < self.config.rounds {
            if phase == Phase::Error {
                report.construction_failures += 1;
                if !self.config.restart_on_failure {
                    break;
                }
                phase = session.restart_game();
                if phase == Phase::Error {
                    tracing::warn!("restart failed, ending simulation");
                    break;
                }
            }

            let Some(answer) = session.current_answer().cloned() else {
                break;
            };
            let cards = session.view().cards;
            let Some(pick) = policy.pick(&cards, &answer, &mut rng) else {
                break;
            };
            let Some(outcome) = session.choose(&pick) else {
                tracing::warn!(%pick, "policy picked a card that is not on the table");
                break;
            };

            report.rounds_played += 1;
            if outcome.correct() {
                report.rounds_correct += 1;
            }
            report.best_streak = report.best_streak.max(outcome.streak());

            if report.rounds_played < self.config.rounds {
                phase = session.start_new_round();
            }
        }

        tracing::info!(
            mode = %report.mode,
            policy = %report.policy,
            played = report.rounds_played,
            correct = report.rounds_correct,
            failures = report.construction_failures,
            "simulation finished"
        );
        report
    }
}
