//! Selling round: reveal checks, collect offers, pair them up.
//!
//! Offers are simultaneous: every player commits a property before any
//! check is paid out. The highest offered property takes the highest check,
//! and equal properties keep seat order.

use crate::agent::{AgentError, AgentRequest, AgentResponse, AgentSeats, GameSnapshot};
use crate::core::{Check, DecisionKind, GameError, GameEvent, GameState, PlayerId, Property};

/// One property sold for one check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sale {
    pub player: PlayerId,
    pub property: Property,
    pub check: Check,
    /// The agent's choice was replaced with a random held property.
    pub substituted: bool,
}

/// Everything that happened in one selling round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// The revealed batch, descending.
    pub revealed: Vec<Check>,
    /// Sales from the highest check down.
    pub sales: Vec<Sale>,
}

/// Runs selling rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationEngine;

impl AllocationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Play one selling round.
    pub fn run_round(&self, state: &mut GameState, agents: &mut AgentSeats) -> Result<AllocationOutcome, GameError> {
        let player_count = state.player_count();
        if agents.player_count() != player_count {
            return Err(GameError::invalid(format!(
                "{} agents for {} players",
                agents.player_count(),
                player_count
            )));
        }
        if let Some(broke) = state.players.values().find(|p| p.properties.is_empty()) {
            return Err(GameError::invalid(format!("{} has no property to sell", broke.id)));
        }

        let mut revealed: Vec<Check> = state.decks.draw_checks(player_count)?.into_vec();
        revealed.sort_unstable_by(|a, b| b.cmp(a));
        let values: Vec<u32> = revealed.iter().map(|c| c.value()).collect();
        log::debug!("round {} reveals checks {:?}", state.round(), values);
        state.record(GameEvent::ChecksRevealed { values });

        let mut offers = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            let (property, substituted) = self.collect_offer(state, agents, player, &revealed)?;
            state.record(GameEvent::Offered {
                player,
                property: property.value(),
                substituted,
            });
            offers.push((player, property, substituted));
        }

        // Stable: equal properties stay in offer order.
        offers.sort_by(|a, b| b.1.cmp(&a.1));

        let mut sales = Vec::with_capacity(player_count);
        for ((player, property, substituted), &check) in offers.into_iter().zip(revealed.iter()) {
            state.player_mut(player).checks.push(check);
            log::debug!("{} sells {} for {}", player, property, check);
            state.record(GameEvent::CheckAwarded {
                player,
                property: property.value(),
                check: check.value(),
            });
            sales.push(Sale {
                player,
                property,
                check,
                substituted,
            });
        }

        Ok(AllocationOutcome { revealed, sales })
    }

    /// Ask a player what to sell and remove it from their holdings.
    ///
    /// Failed invocations and invalid choices are replaced by a uniformly
    /// random held property.
    fn collect_offer(
        &self,
        state: &mut GameState,
        agents: &mut AgentSeats,
        player: PlayerId,
        revealed: &[Check],
    ) -> Result<(Property, bool), GameError> {
        let request = AgentRequest::sell(GameSnapshot::selling(state, revealed), state.player(player));

        let agent = agents.get_mut(player);
        let choice = agent
            .decide(&request)
            .and_then(AgentResponse::into_sale)
            .and_then(|value| {
                if state.player(player).holds(value) {
                    Ok(value)
                } else {
                    Err(AgentError::InvalidChoice(value))
                }
            });

        let (value, substituted) = match choice {
            Ok(value) => (value, false),
            Err(err) => {
                log::warn!("{} ({}) sell failed, choosing at random: {}", player, agent.label(), err);
                state.record(GameEvent::AgentFailed {
                    player,
                    decision: DecisionKind::Sell,
                    reason: err.to_string(),
                });
                let held = state.player(player).property_values();
                let value = *state
                    .rng_mut()
                    .choose(&held)
                    .ok_or_else(|| GameError::invalid(format!("{} has no property to sell", player)))?;
                (value, true)
            }
        };

        let property = state
            .player_mut(player)
            .take_property(value)
            .ok_or_else(|| GameError::invalid(format!("{} does not hold property {}", player, value)))?;
        Ok((property, substituted))
    }
}
