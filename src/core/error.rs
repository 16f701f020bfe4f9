//! Fatal engine errors.
//!
//! Agent failures are not here: they live in `agent::AgentError` and are
//! always recovered by the engines.

use thiserror::Error;

/// Errors that abort a game.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A draw asked for more cards than the deck holds.
    #[error("deck exhausted: requested {requested} cards but only {remaining} remain")]
    DeckExhausted { requested: usize, remaining: usize },

    /// Setup parameters or phase preconditions are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl GameError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidConfiguration(msg.into())
    }
}
