//! Buying round integration tests.
//!
//! These drive `AuctionEngine` with scripted agents over fixed decks and
//! check settlement, ordering and refund rules.

use std::collections::VecDeque;

use for_sale::{
    AgentRequest, AgentResponse, AgentSeats, AuctionEngine, Check, DecisionAgent, DeckManager, FnAgent,
    ForSaleGame, GameConfig, GameEvent, GameRng, GameState, PlayerId, PlayerMap, Property, RefundPolicy,
};
use proptest::prelude::*;

fn state_with(properties: &[u32], player_count: usize) -> GameState {
    let decks = DeckManager::from_cards(
        properties.iter().copied().map(Property::new).collect(),
        Vec::<Check>::new(),
    );
    GameState::new(player_count, 14, decks, GameRng::new(1))
}

/// An agent that plays the given bids in order, then 0 forever.
fn scripted(bids: &[i64]) -> Box<dyn DecisionAgent> {
    let mut bids: VecDeque<i64> = bids.iter().copied().collect();
    Box::new(FnAgent::new(move |_: &AgentRequest| {
        Ok(AgentResponse::Bid {
            bid: bids.pop_front().unwrap_or(0),
        })
    }))
}

fn seats(scripts: &[&[i64]]) -> AgentSeats {
    PlayerMap::from_vec(scripts.iter().map(|bids| scripted(bids)).collect())
}

/// Test the two-player, two-property round where the first bidder passes at once.
#[test]
fn test_two_player_immediate_pass() {
    let mut state = state_with(&[1, 2], 2);
    let mut agents = seats(&[&[0], &[]]);

    let outcome = AuctionEngine::default()
        .run_round(&mut state, &mut agents, PlayerId::new(0))
        .unwrap();

    assert_eq!(outcome.passes.len(), 1);
    let pass = &outcome.passes[0];
    assert_eq!(pass.player, PlayerId::new(0));
    assert_eq!(pass.property, Property::new(1));
    assert_eq!(pass.paid(), 0);

    assert_eq!(outcome.winner, PlayerId::new(1));
    assert_eq!(outcome.winning_bid, 0);
    assert_eq!(outcome.winning_property, Property::new(2));

    assert_eq!(state.player(PlayerId::new(0)).money, 14);
    assert_eq!(state.player(PlayerId::new(1)).money, 14);
    assert_eq!(state.player(PlayerId::new(1)).properties, vec![Property::new(2)]);
}

/// Test refunds on a pass after a contested bid, under both policies.
#[test]
fn test_refund_after_outbid() {
    for (policy, refund) in [(RefundPolicy::RoundDown, 1), (RefundPolicy::RoundUp, 2)] {
        let mut state = state_with(&[9, 4], 2);
        let mut agents = seats(&[&[3, 0], &[5]]);

        let outcome = AuctionEngine::new(policy)
            .run_round(&mut state, &mut agents, PlayerId::new(0))
            .unwrap();

        let pass = &outcome.passes[0];
        assert_eq!(pass.committed, 3);
        assert_eq!(pass.refund, refund);
        assert_eq!(state.player(PlayerId::new(0)).money, 14 - 3 + refund);
        assert_eq!(state.player(PlayerId::new(0)).properties, vec![Property::new(4)]);

        assert_eq!(outcome.winning_bid, 5);
        assert_eq!(state.player(PlayerId::new(1)).money, 9);
        assert_eq!(state.player(PlayerId::new(1)).properties, vec![Property::new(9)]);
    }
}

/// Test that passes take properties lowest first and the survivor takes the top one.
#[test]
fn test_ascending_assignment_four_players() {
    let mut state = state_with(&[30, 7, 18, 2], 4);
    // Seat 0 raises, everyone else drops out in turn order.
    let mut agents = seats(&[&[1], &[0], &[0], &[0]]);

    let outcome = AuctionEngine::default()
        .run_round(&mut state, &mut agents, PlayerId::new(0))
        .unwrap();

    let order: Vec<(PlayerId, Property)> = outcome.passes.iter().map(|s| (s.player, s.property)).collect();
    assert_eq!(
        order,
        vec![
            (PlayerId::new(1), Property::new(2)),
            (PlayerId::new(2), Property::new(7)),
            (PlayerId::new(3), Property::new(18)),
        ]
    );
    assert_eq!(outcome.winner, PlayerId::new(0));
    assert_eq!(outcome.winning_property, Property::new(30));
    assert_eq!(state.player(PlayerId::new(0)).money, 13);
}

/// Test that bidding starts at the given seat and wraps around.
#[test]
fn test_first_bidder_wraps() {
    let mut state = state_with(&[5, 6, 7], 3);
    let mut agents = seats(&[&[0], &[0], &[0]]);

    let outcome = AuctionEngine::default()
        .run_round(&mut state, &mut agents, PlayerId::new(2))
        .unwrap();

    let passers: Vec<PlayerId> = outcome.passes.iter().map(|s| s.player).collect();
    assert_eq!(passers, vec![PlayerId::new(2), PlayerId::new(0)]);
    assert_eq!(outcome.winner, PlayerId::new(1));
}

/// Test that the history records the round in order.
#[test]
fn test_round_history() {
    let mut state = state_with(&[1, 2], 2);
    let mut agents = seats(&[&[2, 0], &[]]);

    AuctionEngine::default()
        .run_round(&mut state, &mut agents, PlayerId::new(0))
        .unwrap();

    let events: Vec<GameEvent> = state.history().iter().map(|r| r.event.clone()).collect();
    assert_eq!(
        events,
        vec![
            GameEvent::PropertiesRevealed { values: vec![1, 2] },
            GameEvent::Raised {
                player: PlayerId::new(0),
                amount: 2,
            },
            GameEvent::Passed {
                player: PlayerId::new(1),
                committed: 0,
                refund: 0,
                property: 1,
            },
            GameEvent::WonAuction {
                player: PlayerId::new(0),
                paid: 2,
                property: 2,
            },
        ]
    );
}

fn always_bids(amount: i64) -> Box<dyn DecisionAgent> {
    Box::new(FnAgent::new(move |_: &AgentRequest| Ok(AgentResponse::Bid { bid: amount })))
}

/// Test that a bid the player's money cannot absorb is treated as a failed pass.
#[test]
fn test_unpayable_bid_passes() {
    let mut state = state_with(&[3, 8], 2);
    state.player_mut(PlayerId::new(0)).money = -10;
    let mut agents = PlayerMap::from_vec(vec![always_bids(i64::MAX), scripted(&[])]);

    let outcome = AuctionEngine::default()
        .run_round(&mut state, &mut agents, PlayerId::new(0))
        .unwrap();

    assert_eq!(outcome.passes[0].player, PlayerId::new(0));
    assert_eq!(outcome.passes[0].paid(), 0);
    assert_eq!(state.player(PlayerId::new(0)).money, -10);
    assert!(state.history().iter().any(|r| matches!(
        &r.event,
        GameEvent::AgentFailed { player, reason, .. }
            if *player == PlayerId::new(0) && reason.contains("out of range")
    )));
}

/// Test that a game against an agent bidding the maximum still completes.
#[test]
fn test_maximum_bids_complete_game() {
    let agents = vec![always_bids(i64::MAX), scripted(&[])];
    let mut game = ForSaleGame::builder(GameConfig::new(2).with_seed(3))
        .agents(agents)
        .build()
        .unwrap();

    let report = game.play().unwrap();

    let raises: Vec<i64> = report
        .history
        .iter()
        .filter_map(|r| match r.event {
            GameEvent::Raised { amount, .. } => Some(amount),
            _ => None,
        })
        .collect();
    assert_eq!(raises, vec![i64::MAX]);

    let seat = report.player(PlayerId::new(0));
    assert_eq!(seat.money, 14 - i64::MAX);
    assert!(seat.score >= seat.money);
    assert!(report.players.iter().all(|p| p.properties.is_empty()));
}

proptest! {
    /// Test the refund arithmetic for both policies.
    #[test]
    fn prop_refund_formula(bid in 0i64..=10_000) {
        let up = AuctionEngine::new(RefundPolicy::RoundUp).calculate_refund(bid);
        let down = AuctionEngine::new(RefundPolicy::RoundDown).calculate_refund(bid);

        prop_assert_eq!(up, (bid + 1) / 2);
        prop_assert_eq!(down, bid / 2);
        prop_assert!(down <= up && up <= bid);
        prop_assert!(up - down <= 1);
    }

    /// Test that arbitrary bid scripts always settle every seat exactly once.
    #[test]
    fn prop_every_seat_settles(
        scripts in prop::collection::vec(prop::collection::vec(0i64..20, 0..6), 2..7),
        first in 0usize..6,
    ) {
        let player_count = scripts.len();
        let properties: Vec<u32> = (1..=player_count as u32).map(|v| v * 3).collect();
        let mut state = state_with(&properties, player_count);
        let mut agents = PlayerMap::from_vec(scripts.iter().map(|bids| scripted(bids)).collect());
        let first = PlayerId::new((first % player_count) as u8);

        let outcome = AuctionEngine::default().run_round(&mut state, &mut agents, first).unwrap();

        prop_assert_eq!(outcome.passes.len(), player_count - 1);
        prop_assert!(outcome.passes.iter().all(|s| s.player != outcome.winner));
        prop_assert_eq!(outcome.winning_property, Property::new(properties[player_count - 1]));
        for window in outcome.passes.windows(2) {
            prop_assert!(window[0].property < window[1].property);
        }
        for player in state.players.values() {
            prop_assert_eq!(player.properties.len(), 1);
        }
    }
}
