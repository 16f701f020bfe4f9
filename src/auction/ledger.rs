//! Per-round bid ledger.
//!
//! Tracks what each player has committed, who has passed, the current high
//! bid and its holder. A ledger lives for exactly one buying round.

use crate::core::{PlayerId, PlayerMap};

/// Transient bidding state for one auction round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidLedger {
    bids: PlayerMap<i64>,
    passed: Vec<PlayerId>,
    current_bid: i64,
    leader: Option<PlayerId>,
}

impl BidLedger {
    /// Fresh ledger: every bid at zero, nobody passed.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            bids: PlayerMap::with_value(player_count, 0),
            passed: Vec::with_capacity(player_count),
            current_bid: 0,
            leader: None,
        }
    }

    #[must_use]
    pub fn current_bid(&self) -> i64 {
        self.current_bid
    }

    /// Provisional leader, if anyone has raised.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        self.leader
    }

    /// A player's last committed bid (0 if it never raised).
    #[must_use]
    pub fn bid_of(&self, player: PlayerId) -> i64 {
        self.bids[player]
    }

    #[must_use]
    pub fn bids(&self) -> &PlayerMap<i64> {
        &self.bids
    }

    /// Players who have passed, in pass order.
    #[must_use]
    pub fn passed(&self) -> &[PlayerId] {
        &self.passed
    }

    #[must_use]
    pub fn is_passed(&self, player: PlayerId) -> bool {
        self.passed.contains(&player)
    }

    /// Players still bidding.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.bids.player_count() - self.passed.len()
    }

    /// Record a raise. Returns false, changing nothing, unless `amount`
    /// strictly exceeds the current bid.
    pub fn raise(&mut self, player: PlayerId, amount: i64) -> bool {
        if amount <= self.current_bid || self.is_passed(player) {
            return false;
        }
        self.current_bid = amount;
        self.bids[player] = amount;
        self.leader = Some(player);
        true
    }

    /// Mark a player as passed and return its committed bid.
    pub fn pass(&mut self, player: PlayerId) -> i64 {
        if !self.is_passed(player) {
            self.passed.push(player);
        }
        self.bids[player]
    }

    /// The first un-passed seat at or after `from`, going round the table.
    #[must_use]
    pub fn next_active(&self, from: PlayerId) -> Option<PlayerId> {
        let player_count = self.bids.player_count();
        let mut seat = from;
        for _ in 0..player_count {
            if !self.is_passed(seat) {
                return Some(seat);
            }
            seat = seat.next(player_count);
        }
        None
    }

    /// The sole remaining bidder once everyone else has passed.
    #[must_use]
    pub fn remaining(&self) -> Option<PlayerId> {
        if self.active_count() != 1 {
            return None;
        }
        self.bids.player_ids().find(|&p| !self.is_passed(p))
    }
}
