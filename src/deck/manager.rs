//! Deck manager for the property and check decks.
//!
//! A `Deck` is an ordered pile with the top at the end of the backing `Vec`.
//! The `DeckManager` builds both decks, shuffles them with independent
//! streams and dispenses fixed-size batches from the top.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::cards::{Check, Property};
use crate::core::error::GameError;
use crate::core::rng::GameRng;

/// Cards revealed together in one round.
///
/// Inline storage covers the usual 2-8 player table without allocating.
pub type Batch<T> = SmallVec<[T; 8]>;

/// An ordered pile of cards. Top = end of vec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<T> {
    cards: Vec<T>,
}

impl<T> Deck<T> {
    /// Create a deck in the given order; the last card is on top.
    #[must_use]
    pub fn new(cards: Vec<T>) -> Self {
        Self { cards }
    }

    /// Create a deck and shuffle it.
    #[must_use]
    pub fn shuffled(mut cards: Vec<T>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove `n` cards from the top, in the order they come off.
    ///
    /// Leaves the deck untouched if fewer than `n` cards remain.
    pub fn draw_batch(&mut self, n: usize) -> Result<Batch<T>, GameError> {
        if self.cards.len() < n {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }

        let split = self.cards.len() - n;
        Ok(self.cards.drain(split..).rev().collect())
    }
}

/// Owns the property and check decks for one game.
///
/// ## Usage
///
/// ```
/// use for_sale::core::GameRng;
/// use for_sale::deck::DeckManager;
///
/// let rng = GameRng::new(42);
/// let mut decks = DeckManager::new(&rng);
///
/// let revealed = decks.draw_properties(4).unwrap();
/// assert_eq!(revealed.len(), 4);
/// assert_eq!(decks.properties_remaining(), 26);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManager {
    properties: Deck<Property>,
    checks: Deck<Check>,
}

impl DeckManager {
    /// Build the full decks and shuffle each with its own stream of `rng`.
    #[must_use]
    pub fn new(rng: &GameRng) -> Self {
        let mut property_rng = rng.for_context("properties");
        let mut check_rng = rng.for_context("checks");

        Self {
            properties: Deck::shuffled(Property::full_deck(), &mut property_rng),
            checks: Deck::shuffled(Check::full_deck(), &mut check_rng),
        }
    }

    /// Build decks with a fixed order (last card on top). No shuffling.
    #[must_use]
    pub fn from_cards(properties: Vec<Property>, checks: Vec<Check>) -> Self {
        Self {
            properties: Deck::new(properties),
            checks: Deck::new(checks),
        }
    }

    /// Reveal `n` properties from the top of the property deck.
    pub fn draw_properties(&mut self, n: usize) -> Result<Batch<Property>, GameError> {
        self.properties.draw_batch(n)
    }

    /// Reveal `n` checks from the top of the check deck.
    pub fn draw_checks(&mut self, n: usize) -> Result<Batch<Check>, GameError> {
        self.checks.draw_batch(n)
    }

    #[must_use]
    pub fn properties_remaining(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn checks_remaining(&self) -> usize {
        self.checks.len()
    }
}
