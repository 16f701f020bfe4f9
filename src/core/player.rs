//! Player identification, per-player storage and seat records.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier supporting 2-255 players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Bid ledgers and agent seats are both `PlayerMap`s.
//!
//! ## Player
//!
//! The authoritative record for one seat: money, held properties and checks.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::cards::{Check, Property};

/// Seat identifier.
///
/// Seat indices are 0-based: the first player is `PlayerId(0)`.
/// Display names are 1-based ("Player 1").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Name used on the agent wire protocol and in reports.
    #[must_use]
    pub fn name(self) -> String {
        format!("Player {}", self.index() + 1)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use for_sale::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ```
/// use for_sale::core::{PlayerId, PlayerMap};
///
/// let mut bids: PlayerMap<i64> = PlayerMap::with_value(3, 0);
/// bids[PlayerId::new(1)] = 4;
/// assert_eq!(bids[PlayerId::new(1)], 4);
/// assert_eq!(bids[PlayerId::new(2)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(PlayerId).map(factory).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Build from one entry per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub money: i64,
    /// Held properties in acquisition order.
    pub properties: Vec<Property>,
    /// Awarded checks in award order.
    pub checks: Vec<Check>,
}

impl Player {
    /// Create a player with starting money and empty holdings.
    #[must_use]
    pub fn new(id: PlayerId, money: i64) -> Self {
        Self {
            id,
            money,
            properties: Vec::new(),
            checks: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.id.name()
    }

    /// Check if the player holds a property with the given value.
    #[must_use]
    pub fn holds(&self, value: u32) -> bool {
        self.properties.iter().any(|p| p.value() == value)
    }

    /// Remove and return the held property with the given value.
    pub fn take_property(&mut self, value: u32) -> Option<Property> {
        let pos = self.properties.iter().position(|p| p.value() == value)?;
        Some(self.properties.remove(pos))
    }

    /// Held property values, in acquisition order.
    #[must_use]
    pub fn property_values(&self) -> Vec<u32> {
        self.properties.iter().map(|p| p.value()).collect()
    }

    /// Held check values, in award order.
    #[must_use]
    pub fn check_values(&self) -> Vec<u32> {
        self.checks.iter().map(|c| c.value()).collect()
    }

    /// Final score: sum of checks plus remaining money.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.checks
            .iter()
            .fold(self.money, |score, c| score.saturating_add(i64::from(c.value())))
    }
}
