use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::intent::Intent;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown session state token: {0:?}")]
pub struct UnknownStateToken(pub String);

/// Where a conversation currently stands.
///
/// The adapter persists the token between turns; nothing else about a
/// session survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Session just started, no word requested yet.
    #[default]
    Stateless,
    /// Expects a generation request or help.
    WordMode,
    /// Just delivered something, expects yes/no/help.
    AskMode,
}

impl SessionState {
    /// The opaque token stored by the adapter.
    pub fn token(&self) -> &'static str {
        match self {
            SessionState::Stateless => "",
            SessionState::WordMode => "WORDMODE",
            SessionState::AskMode => "ASKMODE",
        }
    }

    pub fn from_token(token: &str) -> Result<SessionState, UnknownStateToken> {
        match token {
            "" => Ok(SessionState::Stateless),
            "WORDMODE" => Ok(SessionState::WordMode),
            "ASKMODE" => Ok(SessionState::AskMode),
            other => Err(UnknownStateToken(other.to_string())),
        }
    }
}

impl FromStr for SessionState {
    type Err = UnknownStateToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Stateless => f.write_str("STATELESS"),
            SessionState::WordMode => f.write_str("WORD_MODE"),
            SessionState::AskMode => f.write_str("ASK_MODE"),
        }
    }
}

/// One inbound turn, already authorized and decoded by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogRequest {
    pub session_id: String,
    pub intent: Intent,
    pub state: SessionState,
}

impl DialogRequest {
    pub fn new(session_id: impl Into<String>, intent: Intent, state: SessionState) -> Self {
        Self {
            session_id: session_id.into(),
            intent,
            state,
        }
    }
}
