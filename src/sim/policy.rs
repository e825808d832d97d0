//! Simulated players.

use std::sync::Arc;

use crate::cards::{Character, CharacterId};
use crate::core::RoundRng;

/// Picks a card for a simulated round.
///
/// Policies see the answer so that scripted players can be written; a
/// policy that ignores it plays like a human guessing.
pub trait ChoicePolicy {
    /// Choose one of `cards`. Returning `None` ends the simulation.
    fn pick(
        &mut self,
        cards: &[Arc<Character>],
        answer: &CharacterId,
        rng: &mut RoundRng,
    ) -> Option<CharacterId>;

    /// Short name for reports and logs.
    fn name(&self) -> &'static str;
}

/// Always picks the winning card.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysCorrect;

impl ChoicePolicy for AlwaysCorrect {
    fn pick(
        &mut self,
        _cards: &[Arc<Character>],
        answer: &CharacterId,
        _rng: &mut RoundRng,
    ) -> Option<CharacterId> {
        Some(answer.clone())
    }

    fn name(&self) -> &'static str {
        "always-correct"
    }
}

/// Always picks the first losing card.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysWrong;

impl ChoicePolicy for AlwaysWrong {
    fn pick(
        &mut self,
        cards: &[Arc<Character>],
        answer: &CharacterId,
        _rng: &mut RoundRng,
    ) -> Option<CharacterId> {
        cards.iter().find(|c| c.id != *answer).map(|c| c.id.clone())
    }

    fn name(&self) -> &'static str {
        "always-wrong"
    }
}

/// Uniformly random pick.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomChoice;

impl ChoicePolicy for RandomChoice {
    fn pick(
        &mut self,
        cards: &[Arc<Character>],
        _answer: &CharacterId,
        rng: &mut RoundRng,
    ) -> Option<CharacterId> {
        rng.choose(cards).map(|c| c.id.clone())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
