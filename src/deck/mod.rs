//! Deck management for the two card piles.
//!
//! ## Key Types
//!
//! - `Deck`: an ordered pile, drawn from the top
//! - `DeckManager`: owns the property and check decks for a game
//! - `Batch`: the cards revealed for one round

pub mod manager;

pub use manager::{Batch, Deck, DeckManager};
