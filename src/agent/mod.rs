//! Decision agents: the boundary between the engines and decision-makers.
//!
//! The engines never assume how a decision is made. They build an
//! `AgentRequest` from a copied snapshot, call `DecisionAgent::decide`, and
//! fall back on their own if the call fails.
//!
//! - `DecisionAgent`: the capability trait
//! - `protocol`: versioned request/response schema shared with external agents
//! - `ProcessAgent`: one child process per decision, with a timeout
//! - `RandomAgent`: bundled seeded agent
//! - `FnAgent`: closure adapter

pub mod traits;
pub mod protocol;
pub mod process;
pub mod random;

pub use traits::{AgentError, AgentSeats, DecisionAgent, FnAgent};
pub use protocol::{AgentRequest, AgentResponse, GameSnapshot, Phase, PlayerData, PublicPlayer, PROTOCOL_VERSION};
pub use process::ProcessAgent;
pub use random::{proportional_sale, RandomAgent};
