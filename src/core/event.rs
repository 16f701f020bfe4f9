//! Game history: everything that happened, in order.
//!
//! Engines append an `EventRecord` for every reveal, bid, settlement and
//! award. The history is an `im::Vector` so reports can hold a copy for free.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Which agent decision failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Bid,
    Sell,
}

/// A single thing that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Properties turned face up for a buying round, ascending.
    PropertiesRevealed { values: Vec<u32> },

    /// A player raised the current bid.
    Raised { player: PlayerId, amount: i64 },

    /// A player left the auction, paying its committed bid minus the refund.
    Passed {
        player: PlayerId,
        committed: i64,
        refund: i64,
        property: u32,
    },

    /// The last player standing paid the full bid for the top property.
    WonAuction { player: PlayerId, paid: i64, property: u32 },

    /// Checks turned face up for a selling round, descending.
    ChecksRevealed { values: Vec<u32> },

    /// A player put a property up for sale.
    ///
    /// `substituted` is set when the agent's choice was replaced at random.
    Offered {
        player: PlayerId,
        property: u32,
        substituted: bool,
    },

    /// A check was paid out for an offered property.
    CheckAwarded { player: PlayerId, property: u32, check: u32 },

    /// An agent invocation failed or returned an unusable choice.
    AgentFailed {
        player: PlayerId,
        decision: DecisionKind,
        reason: String,
    },
}

/// A recorded event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Round number within the phase the event belongs to (starts at 1).
    pub round: u32,

    /// Global sequence number (starts at 0).
    pub sequence: u32,

    pub event: GameEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(round: u32, sequence: u32, event: GameEvent) -> Self {
        Self {
            round,
            sequence,
            event,
        }
    }
}
