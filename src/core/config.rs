//! Game configuration types.
//!
//! - `RefundPolicy`: how much of a passing bid is returned
//! - `GameConfig`: everything fixed at setup (players, policy, seed, money)
//!
//! `GameConfig` is serde-friendly so the binary can load it from a JSON file;
//! missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cards::MAX_PROPERTY_VALUE;
use super::error::GameError;

/// Money each player starts with.
pub const STARTING_MONEY: i64 = 14;

/// Default bound on a single agent invocation.
pub const DEFAULT_AGENT_TIMEOUT_MS: u64 = 5_000;

/// Rounding rule for the half-bid refund a passing player receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundPolicy {
    /// Refund `ceil(bid / 2)`.
    RoundUp,
    /// Refund `floor(bid / 2)`.
    #[default]
    RoundDown,
}

impl RefundPolicy {
    /// Money returned to a player passing with `bid` committed.
    ///
    /// ```
    /// use for_sale::core::RefundPolicy;
    ///
    /// assert_eq!(RefundPolicy::RoundUp.refund(5), 3);
    /// assert_eq!(RefundPolicy::RoundDown.refund(5), 2);
    /// assert_eq!(RefundPolicy::RoundUp.refund(0), 0);
    /// ```
    #[must_use]
    pub fn refund(self, bid: i64) -> i64 {
        match self {
            RefundPolicy::RoundUp => (bid + 1).div_euclid(2),
            RefundPolicy::RoundDown => bid.div_euclid(2),
        }
    }
}

impl std::str::FromStr for RefundPolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "round-up" | "round_up" => Ok(RefundPolicy::RoundUp),
            "down" | "round-down" | "round_down" => Ok(RefundPolicy::RoundDown),
            other => Err(GameError::invalid(format!("unknown refund policy '{other}'"))),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (2..=30).
    pub player_count: usize,

    /// Refund rounding, fixed for the whole game.
    pub refund_policy: RefundPolicy,

    /// Seed for deck shuffles, fallback choices and bundled agents.
    pub seed: u64,

    /// Money each player starts with.
    pub starting_money: i64,

    /// Bound on a single out-of-process agent invocation, in milliseconds.
    pub agent_timeout_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            refund_policy: RefundPolicy::default(),
            seed: 42,
            starting_money: STARTING_MONEY,
            agent_timeout_ms: DEFAULT_AGENT_TIMEOUT_MS,
        }
    }
}

impl GameConfig {
    /// Create a configuration with defaults for everything but the player count.
    ///
    /// Call `validate` before use; the builder does not reject bad counts.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_refund_policy(mut self, policy: RefundPolicy) -> Self {
        self.refund_policy = policy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_starting_money(mut self, money: i64) -> Self {
        self.starting_money = money;
        self
    }

    #[must_use]
    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout_ms = timeout.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn agent_timeout(&self) -> Duration {
        Duration::from_millis(self.agent_timeout_ms)
    }

    /// Reject configurations the engines cannot play.
    ///
    /// Every player must get at least one buying round, so the count is
    /// bounded by the property deck size.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_count < 2 {
            return Err(GameError::invalid(format!(
                "at least 2 players are required, got {}",
                self.player_count
            )));
        }
        if self.player_count > MAX_PROPERTY_VALUE as usize {
            return Err(GameError::invalid(format!(
                "at most {} players are supported, got {}",
                MAX_PROPERTY_VALUE, self.player_count
            )));
        }
        if self.starting_money < 0 {
            return Err(GameError::invalid("starting money cannot be negative"));
        }
        if self.agent_timeout_ms == 0 {
            return Err(GameError::invalid("agent timeout must be positive"));
        }
        Ok(())
    }
}
