//! Bundled reference agent.
//!
//! Bids: when it can afford more than the current bid, a coin flip decides
//! between raising to a random affordable amount and standing on its own
//! previous bid (which the engine treats as a pass).
//!
//! Sells: maps the best revealed check onto the player's own property range
//! and offers the property closest to that point, so strong checks draw out
//! strong properties.

use super::protocol::{AgentRequest, AgentResponse};
use super::traits::{AgentError, DecisionAgent};
use crate::core::{GameRng, MAX_CHECK_VALUE};

/// Seeded random agent.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    fn choose_bid(&mut self, money: i64, current_bid: i64, previous_bid: i64) -> i64 {
        if money <= current_bid || !self.rng.gen_bool(0.5) {
            return previous_bid;
        }

        let floor = current_bid.max(previous_bid) + 1;
        if floor > money {
            return previous_bid;
        }
        self.rng.gen_range_inclusive(floor..=money)
    }
}

/// Pick the held property nearest the best check's relative position.
///
/// The best check is placed on the full 0..=15 check scale on purpose, not
/// on the spread of the revealed checks: scaling by that spread always lands
/// on the top property and is undefined when every revealed check is equal.
///
/// Returns `None` when there is nothing to sell.
#[must_use]
pub fn proportional_sale(properties: &[u32], checks: &[u32]) -> Option<u32> {
    let worst = *properties.iter().min()?;
    let best = *properties.iter().max()?;
    if worst == best {
        return properties.first().copied();
    }

    let best_check = checks.iter().max().copied().unwrap_or(0);
    let position = f64::from(best_check) / f64::from(MAX_CHECK_VALUE);
    let target = f64::from(worst) + f64::from(best - worst) * position;

    properties.iter().copied().min_by(|&a, &b| {
        let da = (f64::from(a) - target).abs();
        let db = (f64::from(b) - target).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

impl DecisionAgent for RandomAgent {
    fn decide(&mut self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        match request {
            AgentRequest::Bid {
                player_data,
                current_bid,
                previous_bid,
                ..
            } => Ok(AgentResponse::Bid {
                bid: self.choose_bid(player_data.money, *current_bid, *previous_bid),
            }),
            AgentRequest::Sell {
                game_state,
                player_data,
                ..
            } => proportional_sale(&player_data.properties, &game_state.available_properties)
                .map(|property_to_sell| AgentResponse::Sell { property_to_sell })
                .ok_or_else(|| AgentError::Reported("no properties to sell".to_string())),
        }
    }

    fn label(&self) -> String {
        "random".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_never_exceeds_money() {
        let mut agent = RandomAgent::seeded(3);

        for _ in 0..200 {
            let bid = agent.choose_bid(9, 4, 2);
            assert!(bid == 2 || (5..=9).contains(&bid), "unexpected bid {}", bid);
        }
    }

    #[test]
    fn test_bid_stands_when_broke() {
        let mut agent = RandomAgent::seeded(3);

        for _ in 0..20 {
            assert_eq!(agent.choose_bid(4, 4, 1), 1);
        }
    }

    #[test]
    fn test_bid_sometimes_raises() {
        let mut agent = RandomAgent::seeded(11);
        let raised = (0..100).filter(|_| agent.choose_bid(14, 0, 0) > 0).count();

        assert!(raised > 20 && raised < 80, "raised {} of 100", raised);
    }

    #[test]
    fn test_proportional_sale() {
        // Best check 15 maps to the top of the range.
        assert_eq!(proportional_sale(&[3, 17, 25], &[15, 4, 0]), Some(25));
        // Best check 0 maps to the bottom.
        assert_eq!(proportional_sale(&[3, 17, 25], &[0, 0]), Some(3));
        // 7 / 15 puts the target near 14.7.
        assert_eq!(proportional_sale(&[10, 14, 20], &[7]), Some(14));
    }

    #[test]
    fn test_proportional_sale_equal_checks() {
        // 5 / 15 of the way from 3 to 25 is about 10.3.
        assert_eq!(proportional_sale(&[3, 17, 25], &[5, 5, 5]), Some(17));
        assert_eq!(proportional_sale(&[3, 17, 25], &[15, 15]), Some(25));
    }

    #[test]
    fn test_proportional_sale_edge_cases() {
        assert_eq!(proportional_sale(&[], &[15]), None);
        assert_eq!(proportional_sale(&[8, 8], &[15]), Some(8));
        assert_eq!(proportional_sale(&[6], &[]), Some(6));
    }
}
