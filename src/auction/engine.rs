//! Buying round: reveal, bid, settle.
//!
//! ```text
//! ROUND_START -> BIDDING -> SETTLING (on each pass) -> ROUND_END
//! ```
//!
//! - Round start: reveal one property per player, lowest first.
//! - Bidding: seats act in turn from the first bidder, skipping passed
//!   players. A bid above the current high bid is a raise; anything else is
//!   a pass at the player's own last committed bid.
//! - Settling: a passing player pays its committed bid minus the refund and
//!   takes the cheapest property still on the table.
//! - Round end: the last player standing pays the high bid in full and takes
//!   the most valuable property.

use crate::agent::{AgentError, AgentRequest, AgentResponse, AgentSeats, GameSnapshot};
use crate::core::{DecisionKind, GameError, GameEvent, GameState, PlayerId, Property, RefundPolicy};

use super::ledger::BidLedger;

/// A pass and what it cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub player: PlayerId,
    /// The player's last committed bid.
    pub committed: i64,
    pub refund: i64,
    pub property: Property,
}

impl Settlement {
    /// Money actually spent.
    #[must_use]
    pub fn paid(&self) -> i64 {
        self.committed - self.refund
    }
}

/// Everything that happened in one buying round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionOutcome {
    /// The revealed batch, ascending.
    pub revealed: Vec<Property>,
    /// Passes in the order they happened.
    pub passes: Vec<Settlement>,
    pub winner: PlayerId,
    pub winning_bid: i64,
    pub winning_property: Property,
}

/// Runs buying rounds under a fixed refund policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuctionEngine {
    refund_policy: RefundPolicy,
}

impl AuctionEngine {
    #[must_use]
    pub fn new(refund_policy: RefundPolicy) -> Self {
        Self { refund_policy }
    }

    #[must_use]
    pub fn refund_policy(&self) -> RefundPolicy {
        self.refund_policy
    }

    /// Refund owed to a player passing with `bid` committed.
    #[must_use]
    pub fn calculate_refund(&self, bid: i64) -> i64 {
        self.refund_policy.refund(bid)
    }

    /// Play one buying round, starting with `first_bidder`.
    pub fn run_round(
        &self,
        state: &mut GameState,
        agents: &mut AgentSeats,
        first_bidder: PlayerId,
    ) -> Result<AuctionOutcome, GameError> {
        let player_count = state.player_count();
        if player_count < 2 {
            return Err(GameError::invalid("an auction needs at least 2 players"));
        }
        if agents.player_count() != player_count {
            return Err(GameError::invalid(format!(
                "{} agents for {} players",
                agents.player_count(),
                player_count
            )));
        }

        // ROUND_START
        let mut table: Vec<Property> = state.decks.draw_properties(player_count)?.into_vec();
        table.sort_unstable();
        let revealed = table.clone();
        let values: Vec<u32> = revealed.iter().map(|p| p.value()).collect();
        log::debug!("round {} reveals properties {:?}", state.round(), values);
        state.record(GameEvent::PropertiesRevealed { values });

        // BIDDING
        let mut ledger = BidLedger::new(player_count);
        let mut passes = Vec::with_capacity(player_count - 1);
        let mut seat = first_bidder;

        while ledger.active_count() > 1 {
            let actor = ledger
                .next_active(seat)
                .ok_or_else(|| GameError::invalid("no active bidder left"))?;

            let raised = self
                .request_bid(state, agents, actor, &table, &ledger)
                .filter(|&bid| ledger.raise(actor, bid));

            match raised {
                Some(bid) => {
                    log::debug!("{} raises to {}", actor, bid);
                    state.record(GameEvent::Raised { player: actor, amount: bid });
                }
                None => passes.push(self.settle_pass(state, &mut ledger, &mut table, actor)?),
            }

            seat = actor.next(player_count);
        }

        // ROUND_END
        let winner = ledger
            .remaining()
            .ok_or_else(|| GameError::invalid("auction ended without a sole bidder"))?;
        let winning_property = table
            .pop()
            .ok_or_else(|| GameError::invalid("no property left for the auction winner"))?;
        let winning_bid = ledger.current_bid();

        let player = state.player_mut(winner);
        player.money -= winning_bid;
        player.properties.push(winning_property);

        log::debug!("{} wins {} for {}", winner, winning_property, winning_bid);
        state.record(GameEvent::WonAuction {
            player: winner,
            paid: winning_bid,
            property: winning_property.value(),
        });

        Ok(AuctionOutcome {
            revealed,
            passes,
            winner,
            winning_bid,
            winning_property,
        })
    }

    /// Ask an agent for a bid. `None` means the invocation failed.
    fn request_bid(
        &self,
        state: &mut GameState,
        agents: &mut AgentSeats,
        actor: PlayerId,
        table: &[Property],
        ledger: &BidLedger,
    ) -> Option<i64> {
        let snapshot = GameSnapshot::buying(state, table, ledger.bids(), ledger.passed());
        let request = AgentRequest::bid(
            snapshot,
            state.player(actor),
            ledger.current_bid(),
            ledger.bid_of(actor),
        );

        let agent = agents.get_mut(actor);
        let money = state.player(actor).money;
        // Any accepted raise may later be paid in full.
        let bid = agent.decide(&request).and_then(AgentResponse::into_bid).and_then(|bid| {
            money
                .checked_sub(bid)
                .map(|_| bid)
                .ok_or(AgentError::BidOutOfRange(bid))
        });
        match bid {
            Ok(bid) => Some(bid),
            Err(err) => {
                log::warn!("{} ({}) bid failed, passing: {}", actor, agent.label(), err);
                state.record(GameEvent::AgentFailed {
                    player: actor,
                    decision: DecisionKind::Bid,
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    // SETTLING
    fn settle_pass(
        &self,
        state: &mut GameState,
        ledger: &mut BidLedger,
        table: &mut Vec<Property>,
        actor: PlayerId,
    ) -> Result<Settlement, GameError> {
        let committed = ledger.pass(actor);
        let refund = self.calculate_refund(committed);
        if table.is_empty() {
            return Err(GameError::invalid("no property left for a passing player"));
        }
        let property = table.remove(0);

        let player = state.player_mut(actor);
        player.money -= committed - refund;
        player.properties.push(property);

        log::debug!(
            "{} passes at {} (refund {}) and takes {}",
            actor,
            committed,
            refund,
            property
        );
        state.record(GameEvent::Passed {
            player: actor,
            committed,
            refund,
            property: property.value(),
        });

        Ok(Settlement {
            player: actor,
            committed,
            refund,
            property,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentError, DecisionAgent, FnAgent};
    use crate::core::{Check, GameRng, PlayerMap};
    use crate::deck::DeckManager;

    fn state_with(properties: &[u32], player_count: usize) -> GameState {
        let decks = DeckManager::from_cards(
            properties.iter().copied().map(Property::new).collect(),
            vec![Check::new(0); player_count],
        );
        GameState::new(player_count, 14, decks, GameRng::new(5))
    }

    /// Agents that answer bid requests from a fixed script per seat.
    fn scripted(scripts: Vec<Vec<i64>>) -> AgentSeats {
        let agents: Vec<Box<dyn DecisionAgent>> = scripts
            .into_iter()
            .map(|script| {
                let mut bids = script.into_iter();
                Box::new(FnAgent::new(move |_: &AgentRequest| {
                    Ok(AgentResponse::Bid { bid: bids.next().unwrap_or(0) })
                })) as Box<dyn DecisionAgent>
            })
            .collect();
        PlayerMap::from_vec(agents)
    }

    #[test]
    fn test_two_player_round() {
        let mut state = state_with(&[1, 2], 2);
        let mut agents = scripted(vec![vec![0], vec![]]);
        let engine = AuctionEngine::new(RefundPolicy::RoundDown);

        let outcome = engine.run_round(&mut state, &mut agents, PlayerId::new(0)).unwrap();

        assert_eq!(outcome.passes.len(), 1);
        assert_eq!(outcome.passes[0].player, PlayerId::new(0));
        assert_eq!(outcome.passes[0].property, Property::new(1));
        assert_eq!(outcome.winner, PlayerId::new(1));
        assert_eq!(outcome.winning_property, Property::new(2));
        assert_eq!(outcome.winning_bid, 0);
        assert_eq!(state.player(PlayerId::new(0)).money, 14);
        assert_eq!(state.player(PlayerId::new(1)).money, 14);
    }

    #[test]
    fn test_pass_commits_previous_bid_not_returned_value() {
        // Seat 0 raises to 3, seat 1 raises to 5, seat 0 "bids" 4 which is a pass at 3.
        let mut state = state_with(&[10, 20], 2);
        let mut agents = scripted(vec![vec![3, 4], vec![5]]);
        let engine = AuctionEngine::new(RefundPolicy::RoundUp);

        let outcome = engine.run_round(&mut state, &mut agents, PlayerId::new(0)).unwrap();

        let pass = &outcome.passes[0];
        assert_eq!(pass.player, PlayerId::new(0));
        assert_eq!(pass.committed, 3);
        assert_eq!(pass.refund, 2);
        assert_eq!(pass.property, Property::new(10));
        assert_eq!(state.player(PlayerId::new(0)).money, 14 - 1);

        assert_eq!(outcome.winner, PlayerId::new(1));
        assert_eq!(outcome.winning_bid, 5);
        assert_eq!(state.player(PlayerId::new(1)).money, 14 - 5);
        assert_eq!(state.player(PlayerId::new(1)).properties, vec![Property::new(20)]);
    }

    #[test]
    fn test_equal_bid_is_a_pass() {
        let mut state = state_with(&[4, 8, 12], 3);
        let mut agents = scripted(vec![vec![2], vec![2], vec![2]]);
        let engine = AuctionEngine::default();

        let outcome = engine.run_round(&mut state, &mut agents, PlayerId::new(0)).unwrap();

        // Seat 0 raises to 2; seats 1 and 2 offer 2, which does not beat it.
        assert_eq!(outcome.winner, PlayerId::new(0));
        assert_eq!(outcome.passes.iter().map(|s| s.player).collect::<Vec<_>>(), vec![PlayerId::new(1), PlayerId::new(2)]);
        assert!(outcome.passes.iter().all(|s| s.committed == 0));
    }

    #[test]
    fn test_first_bidder_rotates_start() {
        let mut state = state_with(&[1, 2, 3], 3);
        let mut agents = scripted(vec![vec![], vec![], vec![]]);
        let engine = AuctionEngine::default();

        let outcome = engine.run_round(&mut state, &mut agents, PlayerId::new(2)).unwrap();

        // Everyone passes at 0 starting from seat 2, so seat 1 is left.
        let order: Vec<_> = outcome.passes.iter().map(|s| s.player).collect();
        assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(0)]);
        assert_eq!(outcome.winner, PlayerId::new(1));
        assert_eq!(outcome.winning_property, Property::new(3));
    }

    #[test]
    fn test_failed_agent_passes() {
        let mut state = state_with(&[5, 6], 2);
        let failing: Box<dyn DecisionAgent> =
            Box::new(FnAgent::new(|_: &AgentRequest| Err(AgentError::Reported("down".into()))));
        let bidder: Box<dyn DecisionAgent> =
            Box::new(FnAgent::new(|_: &AgentRequest| Ok(AgentResponse::Bid { bid: 1 })));
        let mut agents = PlayerMap::from_vec(vec![bidder, failing]);

        let outcome = AuctionEngine::default()
            .run_round(&mut state, &mut agents, PlayerId::new(0))
            .unwrap();

        assert_eq!(outcome.winner, PlayerId::new(0));
        assert_eq!(outcome.winning_bid, 1);
        assert!(state.history().iter().any(|r| matches!(
            r.event,
            GameEvent::AgentFailed { player, decision: DecisionKind::Bid, .. } if player == PlayerId::new(1)
        )));
    }

    #[test]
    fn test_short_deck_is_exhausted() {
        let mut state = state_with(&[1], 2);
        let mut agents = scripted(vec![vec![], vec![]]);

        let err = AuctionEngine::default()
            .run_round(&mut state, &mut agents, PlayerId::new(0))
            .unwrap_err();
        assert_eq!(err, GameError::DeckExhausted { requested: 2, remaining: 1 });
    }
}
