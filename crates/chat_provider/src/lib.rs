//! Minimal provider-agnostic contract for producing one assistant reply.
//!
//! This crate defines the LLM boundary ([`ModelTransport`]), the recoverable
//! failure taxonomy of that boundary ([`GenerationError`]), and the two reply
//! strategies built on top of it. It excludes transport details, wire payloads,
//! and transcript ownership.

use std::fmt;
use std::str::FromStr;

mod strategy;

pub use strategy::{
    generator_for_mode, session_turn_text, stateless_prompt, SessionBoundGenerator,
    SessionHandle, StatelessGenerator, BREVITY_INSTRUCTION,
};

/// Error returned while constructing/configuring a transport before any call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Recoverable failure reported by the LLM boundary for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The model declined to produce content for safety reasons.
    Blocked { reason: String },
    /// Any other failure: network, HTTP status, malformed or empty response.
    Api(String),
}

impl GenerationError {
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked { reason } => write!(f, "response blocked ({reason})"),
            Self::Api(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Speaker of one model-facing turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// Provider-neutral model-facing message sent through the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// Immutable metadata describing a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub model_id: String,
}

/// The LLM boundary: one synchronous request carrying an ordered list of turns.
///
/// The final turn is always the newest user turn. Implementations must not keep
/// conversational state of their own; memory lives in [`SessionHandle`].
pub trait ModelTransport: Send + Sync + 'static {
    /// Returns provider/model identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Sends `turns` and returns the model's reply text.
    fn send(&self, turns: &[Turn]) -> Result<String, GenerationError>;
}

/// Reply strategy selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Each call builds one self-contained prompt with no prior turns.
    Stateless,
    /// Calls go through a session handle that replays prior turns.
    #[default]
    SessionBound,
}

impl GenerationMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stateless => "stateless",
            Self::SessionBound => "session",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stateless" => Ok(Self::Stateless),
            "session" | "session-bound" | "session_bound" => Ok(Self::SessionBound),
            other => Err(format!(
                "Unsupported generation mode '{other}'. Available modes: stateless, session"
            )),
        }
    }
}

/// Input for one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Personality directive text (not the label).
    pub personality: String,
    /// Raw user text as typed.
    pub user_text: String,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(personality: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            personality: personality.into(),
            user_text: user_text.into(),
        }
    }
}

/// Produces assistant text for a user turn, possibly failing.
pub trait ResponseGenerator: Send {
    /// Returns the strategy implemented by this generator.
    fn mode(&self) -> GenerationMode;

    /// Returns the identity of the underlying transport.
    fn profile(&self) -> ProviderProfile;

    /// Produces the reply for `request`.
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Forgets every prior turn.
    ///
    /// Stateless generators have nothing to forget.
    fn reset(&mut self) {}
}
