//! # for-sale
//!
//! Engine for the For Sale auction and allocation game.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: every API takes `player_count` as context. Games run
//!    with 2 to 30 seats and nothing assumes two players.
//!
//! 2. **Agents Are Pluggable**: engines talk to decision-makers only through
//!    `DecisionAgent`. A failed decision never stops a game; the engine falls
//!    back (pass when bidding, random property when selling) and records it.
//!
//! 3. **Deterministic Under a Seed**: shuffles, fallbacks and bundled agents
//!    draw from separate `GameRng` streams derived from one seed.
//!
//! ## Game Flow
//!
//! - **Buying**: each round reveals one property per player. Players bid in
//!   turn; passing takes the lowest property on the table and refunds part of
//!   the last bid. The last player standing pays in full for the highest.
//!
//! - **Selling**: each round reveals one check per player. Everyone offers a
//!   property at once; the highest property takes the highest check.
//!
//! ## Modules
//!
//! - `core`: cards, players, state, events, RNG, configuration, errors
//! - `deck`: property and check decks
//! - `agent`: decision trait, wire protocol, process and random agents
//! - `auction`: buying-round engine
//! - `allocation`: selling-round engine
//! - `game`: orchestrator and final report

pub mod core;
pub mod deck;
pub mod agent;
pub mod auction;
pub mod allocation;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Check, Property, MAX_CHECK_VALUE, MAX_PROPERTY_VALUE,
    Player, PlayerId, PlayerMap,
    GameRng,
    GameConfig, RefundPolicy, DEFAULT_AGENT_TIMEOUT_MS, STARTING_MONEY,
    DecisionKind, EventRecord, GameEvent,
    GameError,
    GameState,
};

pub use crate::deck::{Batch, Deck, DeckManager};

pub use crate::agent::{
    AgentError, AgentSeats, DecisionAgent, FnAgent,
    AgentRequest, AgentResponse, GameSnapshot, Phase, PlayerData, PublicPlayer, PROTOCOL_VERSION,
    ProcessAgent, RandomAgent,
};

pub use crate::auction::{AuctionEngine, AuctionOutcome, BidLedger, Settlement};

pub use crate::allocation::{AllocationEngine, AllocationOutcome, Sale};

pub use crate::game::{ForSaleGame, ForSaleGameBuilder, GameReport, PlayerReport};
