// Per-player card supply.
//
// A deck holds the 18 cards a player brings to the game: face values 1..=9,
// each appearing twice, shuffled once at construction. Draws pop from the
// end; the deck only ever shrinks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;
use crate::types::CardValue;

/// Draw attempted on an exhausted deck.
///
/// Unreachable under correct play — a winning run always lands before any
/// player's 18 cards run out on a 121-cell board — so callers treat this
/// as an invariant violation rather than a recoverable condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDeckError;

impl fmt::Display for EmptyDeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draw from an empty deck")
    }
}

impl std::error::Error for EmptyDeckError {}

/// A player's shuffled card supply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardValue>,
}

impl Deck {
    /// Build the standard 18-card deck (1..=9 twice) in a uniformly random
    /// order drawn from `rng`.
    pub fn new(rng: &mut GameRng) -> Self {
        let mut cards: Vec<CardValue> = (1u8..=9).chain(1u8..=9).map(CardValue).collect();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Remove and return the top (last) card.
    pub fn draw(&mut self) -> Result<CardValue, EmptyDeckError> {
        self.cards.pop().ok_or(EmptyDeckError)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_has_eighteen_cards() {
        let mut rng = GameRng::new(42);
        let deck = Deck::new(&mut rng);
        assert_eq!(deck.len(), 18);
    }

    #[test]
    fn fresh_deck_has_each_value_twice() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::new(&mut rng);
        let mut counts = [0usize; 10];
        while let Ok(card) = deck.draw() {
            counts[card.0 as usize] += 1;
        }
        assert_eq!(counts[0], 0);
        for value in 1..=9 {
            assert_eq!(counts[value], 2, "value {value} should appear twice");
        }
    }

    #[test]
    fn draw_shrinks_the_deck() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(&mut rng);
        for expected_len in (0..18).rev() {
            deck.draw().unwrap();
            assert_eq!(deck.len(), expected_len);
        }
    }

    #[test]
    fn draw_from_empty_deck_fails() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(&mut rng);
        for _ in 0..18 {
            deck.draw().unwrap();
        }
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(EmptyDeckError));
    }

    #[test]
    fn same_seed_same_deck_order() {
        let mut rng_a = GameRng::new(77);
        let mut rng_b = GameRng::new(77);
        let mut deck_a = Deck::new(&mut rng_a);
        let mut deck_b = Deck::new(&mut rng_b);
        for _ in 0..18 {
            assert_eq!(deck_a.draw(), deck_b.draw());
        }
    }
}
