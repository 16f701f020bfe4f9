//! Buying phase: one auction per round.
//!
//! - `BidLedger`: transient per-round bidding state
//! - `AuctionEngine`: runs a round and settles payments
//! - `AuctionOutcome` / `Settlement`: what a round produced

pub mod ledger;
pub mod engine;

pub use ledger::BidLedger;
pub use engine::{AuctionEngine, AuctionOutcome, Settlement};
