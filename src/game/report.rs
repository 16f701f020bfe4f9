//! End-of-game results.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EventRecord, GameState, Player, PlayerId, PlayerMap};

/// Final holdings of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player: PlayerId,
    pub name: String,
    pub money: i64,
    pub properties: Vec<u32>,
    pub checks: Vec<u32>,
    /// Checks plus money.
    pub score: i64,
}

impl From<&Player> for PlayerReport {
    fn from(player: &Player) -> Self {
        Self {
            player: player.id,
            name: player.name(),
            money: player.money,
            properties: player.property_values(),
            checks: player.check_values(),
            score: player.score(),
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub players: Vec<PlayerReport>,
    pub winner: PlayerId,
    pub history: Vector<EventRecord>,
}

impl GameReport {
    /// Build the report from the current state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            players: state.players.values().map(PlayerReport::from).collect(),
            winner: winner(&state.players),
            history: state.history().clone(),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerReport {
        &self.players[player.index()]
    }
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.players {
            writeln!(
                f,
                "{}: ${}, Properties: {:?}, Checks: {:?}, Score: {}",
                report.name, report.money, report.properties, report.checks, report.score
            )?;
        }
        write!(f, "Winner: {}", self.winner)
    }
}

/// Highest score wins; ties go to the earliest seat.
#[must_use]
pub fn winner(players: &PlayerMap<Player>) -> PlayerId {
    let mut best = PlayerId::new(0);
    let mut best_score = i64::MIN;
    for (id, player) in players.iter() {
        let score = player.score();
        if score > best_score {
            best = id;
            best_score = score;
        }
    }
    best
}
