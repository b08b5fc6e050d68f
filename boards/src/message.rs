//! Runtime messages between content scripts and the background script.
//!
//! Content scripts cannot run the auth flow themselves, so they send
//! [`RuntimeMessage::GetToken`] and wait for a [`TokenReply`].

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    #[serde(rename = "GET_BOARD_TOKEN")]
    GetToken,
}

impl RuntimeMessage {
    /// Parse an incoming message, returning `None` (and logging) for anything
    /// that is not a recognised `{ "type": ... }` object.
    #[must_use]
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value.clone()) {
            Ok(message) => Some(message),
            Err(e) => {
                log::warn!("ignoring malformed runtime message {value}: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReply {
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenReply {
    #[must_use]
    pub fn from_token(token: Option<Token>) -> Self {
        Self { token: token.map(|t| t.as_str().to_owned()), error: None }
    }

    #[must_use]
    pub fn from_error(error: impl Into<String>) -> Self {
        Self { token: None, error: Some(error.into()) }
    }

    /// Wire form posted back to the content script. A reply that fails to
    /// serialize is replaced by an error reply.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                log::error!("token reply did not serialize: {e}");
                serde_json::to_value(Self::from_error(e.to_string())).unwrap_or_default()
            }
        }
    }

    /// A reply carrying an error, or no token, yields `None`.
    #[must_use]
    pub fn into_token(self) -> Option<Token> {
        if let Some(error) = self.error {
            log::error!("background reported token error: {error}");
            return None;
        }
        self.token.filter(|t| !t.is_empty()).map(Token::new)
    }
}
