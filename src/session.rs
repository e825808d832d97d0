//! Game session: both engines plus settings and lifetime stats.
//!
//! The presentation layer holds one `Session`. It reads [`RoundView`]
//! snapshots and calls `start_new_round`, `choose`, `restart_game`,
//! `set_mode` and `apply_settings`; everything else stays inside.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Character, CharacterId, CharacterPool};
use crate::core::{EngineConfig, TierLadder};
use crate::rounds::{
    ClassicEngine, ClassicOutcome, OddOneOutEngine, OddOneOutOutcome, Phase, RoundEngine,
    RoundFailure,
};
use crate::settings::{SettingChange, Settings, SettingsStore};
use crate::stats::{LifetimeStats, StatsTracker};
use crate::storage::KeyValueStore;

/// Which engine is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Two cards, pick the stronger.
    #[default]
    Classic,
    /// Four cards, pick the odd tier.
    OddOneOut,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Classic => f.write_str("classic"),
            GameMode::OddOneOut => f.write_str("odd-one-out"),
        }
    }
}

/// Resolution of a choice in either mode.
#[derive(Clone, Debug)]
pub enum RoundOutcome {
    /// Classic round result.
    Classic(ClassicOutcome),
    /// Odd-one-out round result.
    OddOneOut(OddOneOutOutcome),
}

impl RoundOutcome {
    /// Was the choice right?
    #[must_use]
    pub fn correct(&self) -> bool {
        match self {
            RoundOutcome::Classic(o) => o.correct,
            RoundOutcome::OddOneOut(o) => o.correct,
        }
    }

    /// Streak after the round.
    #[must_use]
    pub fn streak(&self) -> u32 {
        match self {
            RoundOutcome::Classic(o) => o.streak,
            RoundOutcome::OddOneOut(o) => o.streak,
        }
    }

    /// The winning card's id.
    #[must_use]
    pub fn answer_id(&self) -> &CharacterId {
        match self {
            RoundOutcome::Classic(o) => &o.correct_id,
            RoundOutcome::OddOneOut(o) => &o.odd_id,
        }
    }
}

/// What the presentation layer needs to draw the current state.
#[derive(Clone, Debug)]
pub struct RoundView {
    /// Active mode.
    pub mode: GameMode,
    /// Phase of the active engine.
    pub phase: Phase,
    /// Cards in presentation order.
    pub cards: Vec<Arc<Character>>,
    /// Winning card, only once the round is resolved.
    pub revealed_answer: Option<CharacterId>,
    /// Run streak of the active engine.
    pub streak: u32,
    /// Lifetime counters.
    pub stats: LifetimeStats,
    /// Why the last round could not be built, in the error phase.
    pub failure: Option<RoundFailure>,
    /// Light theme preference.
    pub light_mode: bool,
}

/// Owns everything a running game needs.
pub struct Session {
    pool: Arc<CharacterPool>,
    settings: SettingsStore,
    stats: StatsTracker,
    classic: ClassicEngine,
    odd_one_out: OddOneOutEngine,
    mode: GameMode,
}

impl Session {
    /// Create a session. Settings and stats are loaded from the stores.
    ///
    /// Both engines start in `Loading`; call [`Session::start_new_round`]
    /// once the host is ready to show cards.
    pub fn new(
        pool: CharacterPool,
        ladder: TierLadder,
        settings_store: Box<dyn KeyValueStore>,
        stats_store: Box<dyn KeyValueStore>,
        config: EngineConfig,
    ) -> Self {
        let pool = Arc::new(pool);
        let ladder = Arc::new(ladder);

        tracing::info!(
            characters = pool.len(),
            tiers = ladder.len(),
            "session created"
        );

        Self {
            classic: ClassicEngine::new(Arc::clone(&pool), Arc::clone(&ladder), config.clone()),
            odd_one_out: OddOneOutEngine::new(Arc::clone(&pool), ladder, config.derived(1)),
            pool,
            settings: SettingsStore::load(settings_store),
            stats: StatsTracker::load(stats_store),
            mode: GameMode::default(),
        }
    }

    /// Create a session whose settings and stats share one store.
    pub fn with_store<S>(pool: CharacterPool, ladder: TierLadder, store: S, config: EngineConfig) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        Self::new(pool, ladder, Box::new(store.clone()), Box::new(store), config)
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Switch mode and start a fresh run in it.
    ///
    /// Each mode keeps its own run; switching back restarts that run too.
    pub fn set_mode(&mut self, mode: GameMode) -> Phase {
        tracing::info!(%mode, "switching mode");
        self.mode = mode;
        self.restart_game()
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    /// Replace all settings, persist, and restart the active run.
    pub fn apply_settings(&mut self, settings: Settings) -> Phase {
        self.settings.apply_all(settings);
        self.restart_game()
    }

    /// Change one setting, persist, and restart the active run.
    ///
    /// The theme does not affect rounds and leaves the run alone.
    pub fn apply_setting(&mut self, change: SettingChange) -> Phase {
        let restart = !matches!(change, SettingChange::LightMode(_));
        self.settings.apply(change);
        if restart {
            self.restart_game()
        } else {
            self.phase()
        }
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> LifetimeStats {
        self.stats.stats()
    }

    /// Origins available for the custom series filter.
    #[must_use]
    pub fn available_series(&self) -> Vec<String> {
        self.pool.series()
    }

    /// Classic engine, for hosts that drive it directly.
    #[must_use]
    pub fn classic(&self) -> &ClassicEngine {
        &self.classic
    }

    /// Odd-one-out engine, for hosts that drive it directly.
    #[must_use]
    pub fn odd_one_out(&self) -> &OddOneOutEngine {
        &self.odd_one_out
    }

    /// Phase of the active engine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.mode {
            GameMode::Classic => self.classic.phase(),
            GameMode::OddOneOut => self.odd_one_out.phase(),
        }
    }

    /// Winning card of the current round, revealed or not.
    ///
    /// Presentation code should use [`Session::view`], which hides the
    /// answer until the round is resolved.
    #[must_use]
    pub fn current_answer(&self) -> Option<&CharacterId> {
        match self.mode {
            GameMode::Classic => self.classic.answer_id(),
            GameMode::OddOneOut => self.odd_one_out.answer_id(),
        }
    }

    /// Build the next round in the active mode, keeping the run.
    pub fn start_new_round(&mut self) -> Phase {
        let settings = self.settings.settings();
        match self.mode {
            GameMode::Classic => self.classic.start_new_round(settings),
            GameMode::OddOneOut => self.odd_one_out.start_new_round(settings),
        }
    }

    /// Start a fresh run in the active mode.
    pub fn restart_game(&mut self) -> Phase {
        let settings = self.settings.settings();
        match self.mode {
            GameMode::Classic => self.classic.restart_game(settings),
            GameMode::OddOneOut => self.odd_one_out.restart_game(settings),
        }
    }

    /// Resolve a card pick in the active mode.
    pub fn choose(&mut self, selected: &CharacterId) -> Option<RoundOutcome> {
        match self.mode {
            GameMode::Classic => self
                .classic
                .handle_choice(selected, &mut self.stats)
                .map(RoundOutcome::Classic),
            GameMode::OddOneOut => self
                .odd_one_out
                .handle_choice(selected, &mut self.stats)
                .map(RoundOutcome::OddOneOut),
        }
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn view(&self) -> RoundView {
        match self.mode {
            GameMode::Classic => self.view_of(&self.classic),
            GameMode::OddOneOut => self.view_of(&self.odd_one_out),
        }
    }

    fn view_of<E: RoundEngine>(&self, engine: &E) -> RoundView {
        let phase = engine.phase();
        RoundView {
            mode: self.mode,
            phase,
            cards: engine.cards(),
            revealed_answer: if phase.is_resolved() {
                engine.answer_id().cloned()
            } else {
                None
            },
            streak: engine.streak(),
            stats: self.stats.stats(),
            failure: engine.last_failure().cloned(),
            light_mode: self.settings.settings().light_mode,
        }
    }
}
