//! Authoritative game state.
//!
//! `GameState` owns every mutable piece of a game: the seats, the decks,
//! the fallback RNG stream and the event history. Engines borrow it mutably
//! for one round at a time; agents never see it, only snapshots built from it.

use im::Vector;

use super::event::{EventRecord, GameEvent};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::deck::DeckManager;

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// One record per seat.
    pub players: PlayerMap<Player>,

    /// Undrawn properties and checks.
    pub decks: DeckManager,

    /// Stream used when an agent's decision has to be replaced.
    rng: GameRng,

    history: Vector<EventRecord>,

    /// Current round within the current phase (0 before the first round).
    round: u32,

    next_sequence: u32,
}

impl GameState {
    /// Create a new game state with every player holding `starting_money`.
    #[must_use]
    pub fn new(player_count: usize, starting_money: i64, decks: DeckManager, rng: GameRng) -> Self {
        Self {
            players: PlayerMap::new(player_count, |id| Player::new(id, starting_money)),
            decks,
            rng,
            history: Vector::new(),
            round: 0,
            next_sequence: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Fallback RNG stream.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Rounds ===

    /// Mark the start of a new round; later events are tagged with it.
    pub fn begin_round(&mut self, round: u32) {
        self.round = round;
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    // === History ===

    /// Append an event to the history.
    pub fn record(&mut self, event: GameEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history
            .push_back(EventRecord::new(self.round, sequence, event));
    }

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    // === Totals ===

    /// Sum of all players' money.
    #[must_use]
    pub fn total_money(&self) -> i64 {
        self.players.values().map(|p| p.money).sum()
    }

    /// Number of properties each player holds, if everyone holds the same count.
    #[must_use]
    pub fn uniform_property_count(&self) -> Option<usize> {
        let mut counts = self.players.values().map(|p| p.properties.len());
        let first = counts.next()?;
        counts.all(|c| c == first).then_some(first)
    }
}
