//! API configuration and endpoint construction.
//!
//! Defaults target the public collection API. Builds can override any value
//! through compile-time environment variables; see [`ApiConfig::from_lookup`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::form_urlencoded;

use crate::board::BoardId;
use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.are.na/v2";
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://dev.are.na/oauth";
pub const DEFAULT_CLIENT_ID: &str = "ZMhCuoCSLMPEEHAv-ouY1Lk36bTwV-iNbJkL_q7zAjs";

/// Page size for board search.
pub const SEARCH_PAGE_SIZE: u32 = 10;
/// Number of channels fetched to seed an empty recents cache.
pub const SEED_RECENTS_PAGE_SIZE: u32 = 3;

pub const ENV_API_BASE_URL: &str = "BOARDS_API_BASE_URL";
pub const ENV_OAUTH_BASE_URL: &str = "BOARDS_OAUTH_BASE_URL";
pub const ENV_CLIENT_ID: &str = "BOARDS_CLIENT_ID";
pub const ENV_LOG_LEVEL: &str = "BOARDS_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub oauth_base_url: String,
    pub client_id: String,
    pub log_level: log::Level,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            oauth_base_url: DEFAULT_OAUTH_BASE_URL.to_owned(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            log_level: log::Level::Info,
        }
    }
}

impl ApiConfig {
    /// Build a config from a key lookup, falling back to defaults.
    ///
    /// Keys:
    /// - `BOARDS_API_BASE_URL`
    /// - `BOARDS_OAUTH_BASE_URL`
    /// - `BOARDS_CLIENT_ID`
    /// - `BOARDS_LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty base URL or client id, or
    /// an unknown log level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_base_url = base_url(ENV_API_BASE_URL, lookup(ENV_API_BASE_URL), defaults.api_base_url)?;
        let oauth_base_url = base_url(ENV_OAUTH_BASE_URL, lookup(ENV_OAUTH_BASE_URL), defaults.oauth_base_url)?;
        let client_id = match lookup(ENV_CLIENT_ID) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid { key: ENV_CLIENT_ID, value: raw });
            }
            Some(raw) => raw.trim().to_owned(),
            None => defaults.client_id,
        };
        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(raw) => parse_level(&raw)?,
            None => defaults.log_level,
        };
        Ok(Self { api_base_url, oauth_base_url, client_id, log_level })
    }

    /// Build from variables captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                ENV_API_BASE_URL => option_env!("BOARDS_API_BASE_URL"),
                ENV_OAUTH_BASE_URL => option_env!("BOARDS_OAUTH_BASE_URL"),
                ENV_CLIENT_ID => option_env!("BOARDS_CLIENT_ID"),
                ENV_LOG_LEVEL => option_env!("BOARDS_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    // --- Collection API ---

    #[must_use]
    pub fn me_url(&self) -> String {
        format!("{}/me", self.api_base_url)
    }

    /// The user's most recently updated channels, newest first.
    #[must_use]
    pub fn user_channels_url(&self, user_id: i64) -> String {
        format!(
            "{}/users/{user_id}/channels?sort=updated_at&direction=desc&per={SEED_RECENTS_PAGE_SIZE}",
            self.api_base_url
        )
    }

    /// Text search scoped to channels.
    #[must_use]
    pub fn search_url(&self, term: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", term)
            .append_pair("per", &SEARCH_PAGE_SIZE.to_string())
            .append_pair("type", "channels")
            .finish();
        format!("{}/search?{query}", self.api_base_url)
    }

    #[must_use]
    pub fn channel_blocks_url(&self, board_id: BoardId) -> String {
        format!("{}/channels/{board_id}/blocks", self.api_base_url)
    }

    // --- OAuth ---

    #[must_use]
    pub fn authorize_url(&self, redirect_url: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_url)
            .finish();
        format!("{}/authorize?{query}", self.oauth_base_url)
    }

    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/token", self.oauth_base_url)
    }
}

fn base_url(key: &'static str, raw: Option<String>, default: String) -> Result<String, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid { key, value: raw });
    }
    Ok(trimmed.to_owned())
}

fn parse_level(raw: &str) -> Result<log::Level, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(log::Level::Error),
        "warn" => Ok(log::Level::Warn),
        "info" => Ok(log::Level::Info),
        "debug" => Ok(log::Level::Debug),
        "trace" => Ok(log::Level::Trace),
        _ => Err(ConfigError::Invalid { key: ENV_LOG_LEVEL, value: raw.to_owned() }),
    }
}
