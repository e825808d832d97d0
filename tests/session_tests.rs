//! Session integration tests.
//!
//! These tests cover the facade the presentation layer uses: mode
//! switching, answer reveal, settings and stats persistence.

use vsrdle::sim::synthetic_roster;
use vsrdle::storage::{SETTINGS_KEY, STATS_KEY};
use vsrdle::{
    CharacterPool, EngineConfig, GameMode, KeyValueStore, MemoryStore, Phase, RoundEngine,
    RoundOutcome, Session, SettingChange, Settings, TierLadder,
};

const ORIGINS: &[&str] = &["Saga", "Epic"];

fn ladder() -> TierLadder {
    TierLadder::new(["Tier 0", "1-A", "1-B", "1-C", "2-A", "2-B"]).unwrap()
}

fn session_with(store: MemoryStore, seed: u64) -> Session {
    let ladder = ladder();
    let pool = CharacterPool::new(synthetic_roster(&ladder, 4, ORIGINS));
    Session::with_store(pool, ladder, store, EngineConfig::default().with_seed(seed))
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_new_session_is_loading_classic() {
    let session = session_with(MemoryStore::new(), 1);
    assert_eq!(session.mode(), GameMode::Classic);
    assert_eq!(session.phase(), Phase::Loading);

    let view = session.view();
    assert!(view.cards.is_empty());
    assert!(view.revealed_answer.is_none());
    assert_eq!(view.stats.total_rounds, 0);
}

#[test]
fn test_answer_hidden_until_resolved() {
    let mut session = session_with(MemoryStore::new(), 2);
    assert_eq!(session.start_new_round(), Phase::InRound);

    let view = session.view();
    assert_eq!(view.cards.len(), 2);
    assert!(view.revealed_answer.is_none());

    let answer = session.current_answer().cloned().unwrap();
    let outcome = session.choose(&answer).unwrap();
    assert!(outcome.correct());
    assert!(matches!(outcome, RoundOutcome::Classic(_)));

    let view = session.view();
    assert_eq!(view.phase, Phase::AfterCorrect);
    assert_eq!(view.revealed_answer, Some(answer));
    assert_eq!(view.streak, 1);
    assert_eq!(view.stats.total_correct_rounds, 1);
}

#[test]
fn test_choose_outside_round_is_ignored() {
    let mut session = session_with(MemoryStore::new(), 3);
    session.start_new_round();
    let answer = session.current_answer().cloned().unwrap();

    assert!(session.choose(&answer).is_some());
    assert!(session.choose(&answer).is_none());
    assert_eq!(session.stats().total_rounds, 1);
}

#[test]
fn test_set_mode_switches_engine() {
    let mut session = session_with(MemoryStore::new(), 4);
    assert_eq!(session.set_mode(GameMode::OddOneOut), Phase::InRound);
    assert_eq!(session.view().cards.len(), 4);

    let answer = session.current_answer().cloned().unwrap();
    let outcome = session.choose(&answer).unwrap();
    assert!(matches!(outcome, RoundOutcome::OddOneOut(_)));
    assert_eq!(session.odd_one_out().run().used_count(), 4);
    assert_eq!(session.classic().run().used_count(), 0);

    assert_eq!(session.set_mode(GameMode::Classic), Phase::InRound);
    assert_eq!(session.view().cards.len(), 2);
}

#[test]
fn test_wrong_choice_resets_streak() {
    let mut session = session_with(MemoryStore::new(), 5);
    session.start_new_round();
    let answer = session.current_answer().cloned().unwrap();
    session.choose(&answer).unwrap();

    session.start_new_round();
    let answer = session.current_answer().cloned().unwrap();
    let wrong = session
        .view()
        .cards
        .iter()
        .find(|c| c.id != answer)
        .map(|c| c.id.clone())
        .unwrap();
    let outcome = session.choose(&wrong).unwrap();

    assert!(!outcome.correct());
    assert_eq!(outcome.streak(), 0);
    assert_eq!(outcome.answer_id(), &answer);
    assert_eq!(session.view().phase, Phase::AfterWrong);

    let stats = session.stats();
    assert_eq!(stats.total_rounds, 2);
    assert_eq!(stats.total_correct_rounds, 1);
    assert_eq!(stats.best_streak, 1);
}

// =============================================================================
// Settings Tests
// =============================================================================

#[test]
fn test_apply_settings_restarts_and_persists() {
    let store = MemoryStore::new();
    let mut session = session_with(store.clone(), 6);
    session.start_new_round();
    let answer = session.current_answer().cloned().unwrap();
    session.choose(&answer).unwrap();

    let phase = session.apply_settings(Settings::default().with_custom_series(["Epic"]));
    assert_eq!(phase, Phase::InRound);
    assert_eq!(session.view().streak, 0);
    assert!(session.view().cards.iter().all(|c| c.origin == "Epic"));

    let stored = store.get(SETTINGS_KEY).unwrap().unwrap();
    assert!(stored.contains("\"customSeries\":[\"Epic\"]"));
}

#[test]
fn test_unknown_series_ends_in_error() {
    let mut session = session_with(MemoryStore::new(), 7);
    let phase = session.apply_settings(Settings::default().with_custom_series(["Nowhere"]));

    assert_eq!(phase, Phase::Error);
    let view = session.view();
    assert!(view.cards.is_empty());
    assert!(view.failure.is_some());
}

#[test]
fn test_light_mode_does_not_restart() {
    let mut session = session_with(MemoryStore::new(), 8);
    session.start_new_round();
    let answer = session.current_answer().cloned().unwrap();
    session.choose(&answer).unwrap();

    assert_eq!(session.apply_setting(SettingChange::LightMode(true)), Phase::AfterCorrect);
    assert!(session.view().light_mode);
    assert_eq!(session.view().streak, 1);

    assert_eq!(session.apply_setting(SettingChange::VeryHardMode(true)), Phase::InRound);
    assert_eq!(session.view().streak, 0);
}

#[test]
fn test_series_menu_lists_origins() {
    let session = session_with(MemoryStore::new(), 9);
    assert_eq!(session.available_series(), vec!["Epic".to_string(), "Saga".to_string()]);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_state_survives_new_session() {
    let store = MemoryStore::new();
    {
        let mut session = session_with(store.clone(), 10);
        session.apply_setting(SettingChange::LightMode(true));
        session.start_new_round();
        let answer = session.current_answer().cloned().unwrap();
        session.choose(&answer).unwrap();
    }

    let session = session_with(store.clone(), 11);
    assert!(session.settings().light_mode);
    assert_eq!(session.stats().total_rounds, 1);
    assert_eq!(session.stats().best_streak, 1);
    assert!(store.get(STATS_KEY).unwrap().is_some());
}

#[test]
fn test_malformed_storage_falls_back_to_defaults() {
    let store = MemoryStore::with_entries([
        (SETTINGS_KEY, "{\"veryHardMode\": true, \"customSeries\": 5}"),
        (STATS_KEY, "not json"),
    ]);
    let session = session_with(store, 12);

    assert!(session.settings().very_hard_mode);
    assert!(session.settings().custom_series.is_empty());
    assert_eq!(session.stats().total_rounds, 0);
}
