//! Decision agent trait and its error type.
//!
//! This is the seam between the engines and whatever makes decisions:
//! an in-process strategy, a closure in a test, or an external program.

use std::io;
use std::time::Duration;

use thiserror::Error;

use super::protocol::{AgentRequest, AgentResponse};
use crate::core::PlayerMap;

/// Errors that can occur while asking an agent for a decision.
///
/// None of these end a game: the engines log them and apply a fallback.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent program could not be started.
    #[error("failed to launch agent '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Talking to the agent failed mid-exchange.
    #[error("agent i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The agent did not answer in time.
    #[error("agent did not answer within {0:?}")]
    Timeout(Duration),

    /// The agent program exited unsuccessfully.
    #[error("agent exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    /// The response could not be parsed.
    #[error("malformed agent response: {0}")]
    Malformed(String),

    /// The agent answered with `{"error": ...}`.
    #[error("agent reported an error: {0}")]
    Reported(String),

    /// The agent answered a bid request with a sale or vice versa.
    #[error("expected a {expected} response, got {got}")]
    UnexpectedResponse { expected: &'static str, got: String },

    /// The agent offered a property it does not hold.
    #[error("agent chose property {0}, which it does not hold")]
    InvalidChoice(u32),

    /// The bid cannot be settled against the player's money.
    #[error("bid {0} is out of range")]
    BidOutOfRange(i64),
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Malformed(err.to_string())
    }
}

/// Something that makes bidding and selling decisions for one seat.
///
/// Implementations receive a request built from a copied snapshot and must
/// answer synchronously. They cannot reach the authoritative game state.
///
/// ## Implementation Notes
///
/// - Bid requests expect `AgentResponse::Bid`
/// - Sell requests expect `AgentResponse::Sell` naming a held property
/// - Returning an error is always safe: the engine falls back
pub trait DecisionAgent {
    /// Answer one request.
    fn decide(&mut self, request: &AgentRequest) -> Result<AgentResponse, AgentError>;

    /// Short label for logs.
    fn label(&self) -> String {
        "agent".to_string()
    }
}

/// One agent per seat.
pub type AgentSeats = PlayerMap<Box<dyn DecisionAgent>>;

/// Adapts a closure into a `DecisionAgent`.
///
/// ```
/// use for_sale::agent::{AgentRequest, AgentResponse, DecisionAgent, FnAgent};
///
/// let mut always_pass = FnAgent::new(|_: &AgentRequest| Ok(AgentResponse::Bid { bid: 0 }));
/// # let _ = &mut always_pass as &mut dyn DecisionAgent;
/// ```
pub struct FnAgent<F> {
    decide: F,
}

impl<F> FnAgent<F>
where
    F: FnMut(&AgentRequest) -> Result<AgentResponse, AgentError>,
{
    pub fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<F> DecisionAgent for FnAgent<F>
where
    F: FnMut(&AgentRequest) -> Result<AgentResponse, AgentError>,
{
    fn decide(&mut self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        (self.decide)(request)
    }

    fn label(&self) -> String {
        "closure".to_string()
    }
}
