//! Wire DTOs for the collection API.
//!
//! DESIGN
//! ======
//! Only the fields the extension reads are modelled; serde ignores the rest
//! of the (large) channel and user payloads.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub id: i64,
}

/// A channel as embedded in listing and search payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub title: String,
}

impl From<Channel> for Board {
    fn from(channel: Channel) -> Self {
        Board::new(channel.id, channel.title)
    }
}

/// `GET /users/{id}/channels` and `GET /search?type=channels`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub channels: Option<Vec<Channel>>,
}

impl ChannelList {
    /// Boards in API order; a missing `channels` field is an empty list.
    #[must_use]
    pub fn into_boards(self) -> Vec<Board> {
        self.channels
            .unwrap_or_default()
            .into_iter()
            .map(Board::from)
            .collect()
    }
}

/// `POST /channels/{id}/blocks` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBlock<'a> {
    /// URL of the image to attach.
    pub source: &'a str,
    /// Page the image was found on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source_url: Option<&'a str>,
}

impl<'a> CreateBlock<'a> {
    /// Provenance is attached only when the page URL is non-empty.
    #[must_use]
    pub fn new(source: &'a str, page_url: &'a str) -> Self {
        let original_source_url = if page_url.is_empty() { None } else { Some(page_url) };
        Self { source, original_source_url }
    }
}

/// OAuth token endpoint reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchange {
    #[serde(default)]
    pub access_token: Option<String>,
}
