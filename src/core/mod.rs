//! Core engine types: cards, players, state, events, RNG, configuration, errors.
//!
//! Everything the auction and allocation engines share lives here.

pub mod cards;
pub mod player;
pub mod rng;
pub mod config;
pub mod event;
pub mod error;
pub mod state;

pub use cards::{Check, Property, MAX_CHECK_VALUE, MAX_PROPERTY_VALUE};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, RefundPolicy, DEFAULT_AGENT_TIMEOUT_MS, STARTING_MONEY};
pub use event::{DecisionKind, EventRecord, GameEvent};
pub use error::GameError;
pub use state::GameState;
