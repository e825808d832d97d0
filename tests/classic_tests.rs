//! Classic mode integration tests.
//!
//! These tests drive `ClassicEngine` through whole runs: strength
//! comparison on a real ladder, pool exhaustion, very hard mode and
//! restarts.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use vsrdle::{
    Character, CharacterId, CharacterPool, ClassicEngine, EngineConfig, MemoryStore, Phase,
    RoundEngine, RoundFailure, Settings, StatsTracker, TierLadder,
};

fn character(id: &str, origin: &str, tier: &str) -> Character {
    Character::new(CharacterId::new(id), id, origin).with_tier(tier)
}

fn engine(ladder: TierLadder, characters: Vec<Character>, seed: u64) -> ClassicEngine {
    ClassicEngine::new(
        Arc::new(CharacterPool::new(characters)),
        Arc::new(ladder),
        EngineConfig::default().with_seed(seed),
    )
}

fn stats() -> StatsTracker {
    StatsTracker::load(Box::new(MemoryStore::new()))
}

// =============================================================================
// Strength Tests
// =============================================================================

#[test]
fn test_tier_zero_beats_one_a() {
    let ladder = TierLadder::new(["Tier 0", "High 1-A", "1-A", "Low 1-A", "High 1-B"]).unwrap();
    let omni = character("omni", "Saga", "Tier 0");
    let hero = character("hero", "Saga", "1-A");

    assert_eq!(ladder.compare_strength(&omni, &hero).map(|c| &c.id), Some(&omni.id));
    assert_eq!(ladder.compare_strength(&hero, &omni).map(|c| &c.id), Some(&omni.id));
}

#[test]
fn test_correct_id_is_always_stronger() {
    let ladder = TierLadder::standard();
    let characters: Vec<_> = ladder
        .iter()
        .take(10)
        .enumerate()
        .map(|(i, tier)| character(&format!("c{i}"), "Saga", tier))
        .collect();

    for seed in 0..30 {
        let mut engine = engine(ladder.clone(), characters.clone(), seed);
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::InRound);

        let cards = engine.cards();
        let answer = engine.answer_id().unwrap();
        let ranks: Vec<_> = cards.iter().map(|c| ladder.rank_of(c).unwrap()).collect();
        let strongest = if ranks[0] < ranks[1] { &cards[0] } else { &cards[1] };
        assert_eq!(&strongest.id, answer);
        assert_ne!(ranks[0], ranks[1]);
    }
}

#[test]
fn test_left_right_order_varies() {
    let ladder = TierLadder::new(["A", "B"]).unwrap();
    let characters = vec![character("a", "Saga", "A"), character("b", "Saga", "B")];

    let mut strong_left = 0;
    for seed in 0..100 {
        let mut engine = engine(ladder.clone(), characters.clone(), seed);
        engine.start_new_round(&Settings::default());
        if engine.cards()[0].id.as_str() == "a" {
            strong_left += 1;
        }
    }
    assert!(strong_left > 20 && strong_left < 80, "strong_left = {strong_left}");
}

// =============================================================================
// Exhaustion Tests
// =============================================================================

#[test]
fn test_two_characters_last_one_round() {
    let ladder = TierLadder::new(["A", "B"]).unwrap();

    for correct in [true, false] {
        let mut engine = engine(
            ladder.clone(),
            vec![character("a", "Saga", "A"), character("b", "Saga", "B")],
            3,
        );
        let mut stats = stats();
        assert_eq!(engine.start_new_round(&Settings::default()), Phase::InRound);

        let pick = if correct { "a" } else { "b" };
        let outcome = engine.handle_choice(&CharacterId::new(pick), &mut stats).unwrap();
        assert_eq!(outcome.correct, correct);

        assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);
        assert_eq!(
            engine.last_failure(),
            Some(&RoundFailure::TooFewTierGroups { groups: 0 })
        );
        assert!(engine.cards().is_empty());
    }
}

#[test]
fn test_no_identity_repeats_within_run() {
    let ladder = TierLadder::new(["A", "B", "C", "D"]).unwrap();
    let mut characters = Vec::new();
    for (i, tier) in ["A", "B", "C", "D"].into_iter().enumerate() {
        for n in 0..3 {
            characters.push(character(&format!("{tier}{n}"), "Saga", tier));
        }
        // duplicate record of the same character in a weaker tier
        if i < 3 {
            characters.push(
                Character::new(CharacterId::new(format!("{tier}0-dup")), format!("{tier}0"), "Saga")
                    .with_tier(["B", "C", "D"][i]),
            );
        }
    }

    let mut engine = engine(ladder, characters, 17);
    let mut stats = stats();
    let mut seen = FxHashSet::default();

    while engine.start_new_round(&Settings::default()) == Phase::InRound {
        let keys: FxHashSet<_> = engine.cards().iter().map(|c| c.identity_key()).collect();
        for key in &keys {
            assert!(!seen.contains(key), "{key} shown in an earlier round");
        }
        seen.extend(keys);
        let answer = engine.answer_id().cloned().unwrap();
        engine.handle_choice(&answer, &mut stats).unwrap();
    }
    assert!(seen.len() >= 2);
    assert_eq!(engine.phase(), Phase::Error);
}

#[test]
fn test_one_character_in_two_tiers_forms_a_round() {
    let ladder = TierLadder::new(["A", "B"]).unwrap();
    let characters = vec![
        Character::new(CharacterId::new("g1"), "Goku", "DB").with_tier("A"),
        Character::new(CharacterId::new("g2"), "Goku", "DB").with_tier("B"),
    ];
    let mut engine = engine(ladder, characters, 4);
    let mut stats = stats();

    assert_eq!(engine.start_new_round(&Settings::default()), Phase::InRound);
    assert_eq!(engine.answer_id().map(|id| id.as_str()), Some("g1"));

    engine.handle_choice(&CharacterId::new("g2"), &mut stats).unwrap();
    assert_eq!(engine.run().used_count(), 1);
    assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);
}

// =============================================================================
// Very Hard Mode Tests
// =============================================================================

#[test]
fn test_very_hard_without_distance_three_errors() {
    let ladder = TierLadder::new(["T0", "T1", "T2", "T3", "T4", "T5"]).unwrap();
    let mut engine = engine(
        ladder,
        vec![
            character("x", "Saga", "T0"),
            character("y", "Saga", "T1"),
            character("z", "Saga", "T2"),
        ],
        5,
    );
    let settings = Settings::default().with_very_hard_mode(true);

    assert_eq!(engine.start_new_round(&settings), Phase::Error);
    assert_eq!(
        engine.last_failure(),
        Some(&RoundFailure::NoTierPairAtDistance { distance: 3 })
    );
}

#[test]
fn test_very_hard_pairs_are_exactly_three_apart() {
    let ladder = TierLadder::standard();
    let characters: Vec<_> = ladder
        .iter()
        .enumerate()
        .flat_map(|(i, tier)| {
            (0..2).map(move |n| character(&format!("{i}-{n}"), "Saga", tier))
        })
        .collect();
    let settings = Settings::default().with_very_hard_mode(true);

    for seed in 0..20 {
        let mut engine = engine(ladder.clone(), characters.clone(), seed);
        assert_eq!(engine.start_new_round(&settings), Phase::InRound);

        let cards = engine.cards();
        let a = cards[0].highest_tier.as_deref().unwrap();
        let b = cards[1].highest_tier.as_deref().unwrap();
        assert_eq!(ladder.distance(a, b), Some(3));
        assert_ne!(a, ladder.top());
        assert_ne!(b, ladder.top());
    }
}

// =============================================================================
// Restart Tests
// =============================================================================

#[test]
fn test_restart_clears_history_and_streak() {
    let ladder = TierLadder::new(["A", "B"]).unwrap();
    let mut engine = engine(
        ladder,
        vec![character("a", "Saga", "A"), character("b", "Saga", "B")],
        8,
    );
    let mut stats = stats();

    engine.start_new_round(&Settings::default());
    let outcome = engine.handle_choice(&CharacterId::new("a"), &mut stats).unwrap();
    assert_eq!(outcome.streak, 1);
    assert_eq!(engine.start_new_round(&Settings::default()), Phase::Error);

    assert_eq!(engine.restart_game(&Settings::default()), Phase::InRound);
    assert_eq!(engine.streak(), 0);
    assert_eq!(engine.run().used_count(), 0);
    assert!(engine.last_failure().is_none());

    assert_eq!(stats.stats().total_rounds, 1);
    assert_eq!(stats.stats().best_streak, 1);
}

#[test]
fn test_series_filter_limits_pool() {
    let ladder = TierLadder::new(["A", "B"]).unwrap();
    let mut engine = engine(
        ladder,
        vec![
            character("a1", "Saga", "A"),
            character("b1", "Saga", "B"),
            character("a2", "Epic", "A"),
            character("b2", "Epic", "B"),
        ],
        2,
    );
    let settings = Settings::default().with_custom_series(["Epic"]);

    for _ in 0..10 {
        engine.restart_game(&settings);
        assert!(engine.cards().iter().all(|c| c.origin == "Epic"));
    }
}
