//! Game orchestrator.
//!
//! Buying rounds run until the property deck cannot fill another round,
//! then selling rounds run until every held property has been sold.

use crate::agent::{AgentSeats, DecisionAgent, RandomAgent};
use crate::allocation::AllocationEngine;
use crate::auction::AuctionEngine;
use crate::core::{EventRecord, GameConfig, GameError, GameRng, GameState, PlayerId, PlayerMap};
use crate::deck::DeckManager;

use super::report::{winner, GameReport};

/// A full game: state, agents and the two engines.
pub struct ForSaleGame {
    config: GameConfig,
    state: GameState,
    agents: AgentSeats,
    auction: AuctionEngine,
    allocation: AllocationEngine,
    /// Opens the next buying round: the previous round's winner.
    first_bidder: PlayerId,
}

/// Builder for creating a `ForSaleGame`.
///
/// Decks default to a shuffle of the full decks under the config seed, and
/// agents default to one seeded `RandomAgent` per seat.
pub struct ForSaleGameBuilder {
    config: GameConfig,
    decks: Option<DeckManager>,
    agents: Option<Vec<Box<dyn DecisionAgent>>>,
}

impl ForSaleGameBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            decks: None,
            agents: None,
        }
    }

    /// Use prepared decks instead of shuffling.
    pub fn decks(mut self, decks: DeckManager) -> Self {
        self.decks = Some(decks);
        self
    }

    /// One agent per seat, in seat order.
    pub fn agents(mut self, agents: Vec<Box<dyn DecisionAgent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate the configuration and build the game.
    pub fn build(self) -> Result<ForSaleGame, GameError> {
        let config = self.config;
        config.validate()?;

        let rng = GameRng::new(config.seed);
        let decks = self.decks.unwrap_or_else(|| DeckManager::new(&rng));

        let agents = match self.agents {
            Some(agents) if agents.len() != config.player_count => {
                return Err(GameError::invalid(format!(
                    "{} agents supplied for {} players",
                    agents.len(),
                    config.player_count
                )));
            }
            Some(agents) => PlayerMap::from_vec(agents),
            None => PlayerMap::new(config.player_count, |seat| {
                let stream = rng.for_context(&format!("agent-{}", seat.index()));
                Box::new(RandomAgent::new(stream)) as Box<dyn DecisionAgent>
            }),
        };

        let state = GameState::new(
            config.player_count,
            config.starting_money,
            decks,
            rng.for_context("fallback"),
        );

        Ok(ForSaleGame {
            auction: AuctionEngine::new(config.refund_policy),
            allocation: AllocationEngine::new(),
            config,
            state,
            agents,
            first_bidder: PlayerId::new(0),
        })
    }
}

impl ForSaleGame {
    /// Start building a game.
    pub fn builder(config: GameConfig) -> ForSaleGameBuilder {
        ForSaleGameBuilder::new(config)
    }

    /// A game with shuffled decks and random agents.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        ForSaleGameBuilder::new(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<EventRecord> {
        self.state.history()
    }

    /// Play both phases and report the result.
    pub fn play(&mut self) -> Result<GameReport, GameError> {
        let buying = self.buying_phase()?;
        let selling = self.selling_phase()?;
        let report = self.report();

        log::info!(
            "game over after {} buying and {} selling rounds, winner {}",
            buying,
            selling,
            report.winner
        );
        Ok(report)
    }

    /// Run auctions while the property deck can fill a round.
    ///
    /// Returns the number of rounds played.
    pub fn buying_phase(&mut self) -> Result<u32, GameError> {
        let player_count = self.state.player_count();
        log::info!(
            "buying phase: {} properties for {} players",
            self.state.decks.properties_remaining(),
            player_count
        );

        let mut rounds = 0;
        while self.state.decks.properties_remaining() >= player_count {
            rounds += 1;
            self.state.begin_round(rounds);
            let outcome = self
                .auction
                .run_round(&mut self.state, &mut self.agents, self.first_bidder)?;
            log::info!(
                "buying round {}: {} takes {} for {}",
                rounds,
                outcome.winner,
                outcome.winning_property,
                outcome.winning_bid
            );
            self.first_bidder = outcome.winner;
        }
        Ok(rounds)
    }

    /// Run one selling round per property each player holds.
    ///
    /// Returns the number of rounds played.
    pub fn selling_phase(&mut self) -> Result<u32, GameError> {
        let held = self
            .state
            .uniform_property_count()
            .ok_or_else(|| GameError::invalid("players hold unequal numbers of properties"))?;
        log::info!("selling phase: {} rounds", held);

        let mut rounds = 0;
        for _ in 0..held {
            rounds += 1;
            self.state.begin_round(rounds);
            let outcome = self.allocation.run_round(&mut self.state, &mut self.agents)?;
            log::info!("selling round {}: {} sales", rounds, outcome.sales.len());
        }
        Ok(rounds)
    }

    /// Current leader by score, ties to the earliest seat.
    #[must_use]
    pub fn winner(&self) -> PlayerId {
        winner(&self.state.players)
    }

    #[must_use]
    pub fn report(&self) -> GameReport {
        GameReport::from_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Check, Property, RefundPolicy};

    #[test]
    fn test_game_creation() {
        let game = ForSaleGame::new(GameConfig::new(4)).unwrap();

        assert_eq!(game.state().player_count(), 4);
        assert_eq!(game.state().total_money(), 56);
        assert_eq!(game.state().decks.properties_remaining(), 30);
        assert_eq!(game.config().refund_policy, RefundPolicy::RoundDown);
    }

    #[test]
    fn test_rejects_single_player() {
        let err = ForSaleGame::new(GameConfig::new(1)).err().unwrap();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_wrong_agent_count() {
        let result = ForSaleGame::builder(GameConfig::new(3))
            .agents(vec![Box::new(RandomAgent::seeded(1))])
            .build();
        assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_buying_phase_round_count() {
        let mut game = ForSaleGame::new(GameConfig::new(4)).unwrap();

        // 30 properties, 4 per round: 7 rounds and 2 left over.
        assert_eq!(game.buying_phase().unwrap(), 7);
        assert_eq!(game.state().decks.properties_remaining(), 2);
        assert_eq!(game.state().uniform_property_count(), Some(7));
    }

    #[test]
    fn test_play_to_completion() {
        let mut game = ForSaleGame::new(GameConfig::new(5).with_seed(9)).unwrap();
        let report = game.play().unwrap();

        assert_eq!(report.players.len(), 5);
        for player in &report.players {
            assert!(player.properties.is_empty());
            assert_eq!(player.checks.len(), 6);
        }
        assert_eq!(game.state().decks.checks_remaining(), 0);
        assert_eq!(report.winner, game.winner());
    }

    #[test]
    fn test_selling_phase_rejects_unequal_holdings() {
        let decks = DeckManager::from_cards(vec![Property::new(1)], vec![Check::new(2), Check::new(3)]);
        let mut game = ForSaleGame::builder(GameConfig::new(2)).decks(decks).build().unwrap();
        game.state.player_mut(PlayerId::new(0)).properties.push(Property::new(1));

        let err = game.selling_phase().unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }
}
