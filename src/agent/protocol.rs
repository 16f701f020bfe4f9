//! Wire schema for agent requests and responses.
//!
//! One JSON object goes to the agent per decision and one comes back:
//!
//! ```text
//! -> {"action": "bid", "version": 1, "game_state": {...},
//!     "player_data": {"money": 14, "properties": []},
//!     "current_bid": 3, "previous_bid": 0}
//! <- {"bid": 4}
//!
//! -> {"action": "sell", "version": 1, "game_state": {...},
//!     "player_data": {"money": 2, "properties": [3, 17, 25]}}
//! <- {"property_to_sell": 17}
//!
//! <- {"error": "..."}            (treated as an invocation failure)
//! ```
//!
//! Snapshots are built field by field from the game state. They copy
//! values only, never expose undrawn cards, and never list another
//! player's held properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::traits::AgentError;
use crate::core::{Check, DecisionKind, GameState, Player, PlayerId, PlayerMap, Property};

/// Schema version sent with every request.
pub const PROTOCOL_VERSION: u32 = 1;

/// Which phase a snapshot was taken in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Buying,
    Selling,
}

/// What everyone at the table can see about a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub name: String,
    pub property_count: usize,
    pub check_count: usize,
}

impl From<&Player> for PublicPlayer {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name(),
            property_count: player.properties.len(),
            check_count: player.checks.len(),
        }
    }
}

/// Read-only projection of public game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,

    /// Revealed card values: properties (ascending) while buying,
    /// checks (descending) while selling.
    pub available_properties: Vec<u32>,

    /// Bids so far this round, by player name. Empty while selling.
    #[serde(default)]
    pub player_bids: BTreeMap<String, i64>,

    /// Players who have passed this round, in pass order.
    #[serde(default)]
    pub passed_players: Vec<String>,

    pub players: Vec<PublicPlayer>,
}

impl GameSnapshot {
    /// Snapshot for a bidding turn.
    #[must_use]
    pub fn buying(
        state: &GameState,
        revealed: &[Property],
        bids: &PlayerMap<i64>,
        passed: &[PlayerId],
    ) -> Self {
        Self {
            phase: Phase::Buying,
            available_properties: revealed.iter().map(|p| p.value()).collect(),
            player_bids: bids.iter().map(|(id, &bid)| (id.name(), bid)).collect(),
            passed_players: passed.iter().map(|id| id.name()).collect(),
            players: Self::public_players(state),
        }
    }

    /// Snapshot for a selling decision: revealed checks only.
    #[must_use]
    pub fn selling(state: &GameState, revealed: &[Check]) -> Self {
        Self {
            phase: Phase::Selling,
            available_properties: revealed.iter().map(|c| c.value()).collect(),
            player_bids: BTreeMap::new(),
            passed_players: Vec::new(),
            players: Self::public_players(state),
        }
    }

    fn public_players(state: &GameState) -> Vec<PublicPlayer> {
        state.players.values().map(PublicPlayer::from).collect()
    }
}

/// The acting player's own holdings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub money: i64,
    pub properties: Vec<u32>,
}

impl From<&Player> for PlayerData {
    fn from(player: &Player) -> Self {
        Self {
            money: player.money,
            properties: player.property_values(),
        }
    }
}

/// A request for one decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentRequest {
    Bid {
        version: u32,
        game_state: GameSnapshot,
        player_data: PlayerData,
        current_bid: i64,
        previous_bid: i64,
    },
    Sell {
        version: u32,
        game_state: GameSnapshot,
        player_data: PlayerData,
    },
}

impl AgentRequest {
    #[must_use]
    pub fn bid(game_state: GameSnapshot, player: &Player, current_bid: i64, previous_bid: i64) -> Self {
        AgentRequest::Bid {
            version: PROTOCOL_VERSION,
            game_state,
            player_data: PlayerData::from(player),
            current_bid,
            previous_bid,
        }
    }

    #[must_use]
    pub fn sell(game_state: GameSnapshot, player: &Player) -> Self {
        AgentRequest::Sell {
            version: PROTOCOL_VERSION,
            game_state,
            player_data: PlayerData::from(player),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DecisionKind {
        match self {
            AgentRequest::Bid { .. } => DecisionKind::Bid,
            AgentRequest::Sell { .. } => DecisionKind::Sell,
        }
    }

    #[must_use]
    pub fn game_state(&self) -> &GameSnapshot {
        match self {
            AgentRequest::Bid { game_state, .. } | AgentRequest::Sell { game_state, .. } => game_state,
        }
    }

    #[must_use]
    pub fn player_data(&self) -> &PlayerData {
        match self {
            AgentRequest::Bid { player_data, .. } | AgentRequest::Sell { player_data, .. } => player_data,
        }
    }
}

/// An agent's answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentResponse {
    Bid { bid: i64 },
    Sell { property_to_sell: u32 },
    Error { error: String },
}

impl AgentResponse {
    /// Parse the first JSON object in an agent's output.
    ///
    /// Anything after the first object is ignored.
    pub fn parse(output: &str) -> Result<Self, AgentError> {
        let mut stream = serde_json::Deserializer::from_str(output).into_iter::<AgentResponse>();
        match stream.next() {
            Some(response) => Ok(response?),
            None => Err(AgentError::Malformed("empty response".to_string())),
        }
    }

    /// Interpret as a bid amount.
    pub fn into_bid(self) -> Result<i64, AgentError> {
        match self {
            AgentResponse::Bid { bid } => Ok(bid),
            AgentResponse::Error { error } => Err(AgentError::Reported(error)),
            other => Err(AgentError::UnexpectedResponse {
                expected: "bid",
                got: format!("{other:?}"),
            }),
        }
    }

    /// Interpret as the value of the property to sell.
    pub fn into_sale(self) -> Result<u32, AgentError> {
        match self {
            AgentResponse::Sell { property_to_sell } => Ok(property_to_sell),
            AgentResponse::Error { error } => Err(AgentError::Reported(error)),
            other => Err(AgentError::UnexpectedResponse {
                expected: "sell",
                got: format!("{other:?}"),
            }),
        }
    }
}
