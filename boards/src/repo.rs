//! Board repository: recents cache plus the REST calls behind it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The save orchestrator talks to boards only through [`BoardRepository`].
//! [`RestBoardRepository`] is the production implementation; it reads and
//! writes the MRU cache in durable storage and calls the collection API
//! through an [`HttpClient`].
//!
//! ERROR HANDLING
//! ==============
//! Each public method runs a private `Result`-returning helper and collapses
//! failures at the boundary: lists become empty, saves become a failed
//! [`SaveOutcome`], seeding becomes a logged no-op.

#[cfg(test)]
#[path = "repo_test.rs"]
mod repo_test;

use crate::api::{ChannelList, CreateBlock, MeResponse};
use crate::board::Board;
use crate::config::ApiConfig;
use crate::error::{ApiError, StorageError};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::recents::{RECENTS_KEY, RecentBoards};
use crate::store::{self, KeyValueStore};
use crate::token::Token;

pub const SAVED_MESSAGE: &str = "Saved!";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving block.";

/// Result of appending an image to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
}

impl SaveOutcome {
    #[must_use]
    pub fn saved() -> Self {
        Self { success: true, message: SAVED_MESSAGE.to_owned() }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

#[async_trait::async_trait(?Send)]
pub trait BoardRepository {
    /// Cached recents, most recent first. Never touches the network.
    async fn list_recents(&self) -> Vec<Board>;

    /// Seed the cache with the user's most recently updated boards. No-op
    /// when the cache already has an entry.
    async fn populate_initial_recents(&self, token: &Token);

    /// Boards matching `term`. A blank term returns nothing without a request.
    async fn search(&self, token: &Token, term: &str) -> Vec<Board>;

    /// Append `image_url` to `board`, recording `page_url` as provenance, and
    /// move `board` to the front of the recents cache on success.
    async fn save(&self, token: &Token, board: &Board, image_url: &str, page_url: &str) -> SaveOutcome;
}

pub struct RestBoardRepository<H, S> {
    config: ApiConfig,
    http: H,
    store: S,
}

impl<H, S> RestBoardRepository<H, S>
where
    H: HttpClient,
    S: KeyValueStore,
{
    pub fn new(config: ApiConfig, http: H, store: S) -> Self {
        Self { config, http, store }
    }

    async fn load_recents(&self) -> Result<RecentBoards, StorageError> {
        Ok(store::load(&self.store, RECENTS_KEY).await?.unwrap_or_default())
    }

    async fn get(&self, token: &Token, url: String) -> Result<HttpResponse, ApiError> {
        self.http
            .send(HttpRequest::get(url).bearer(token))
            .await?
            .error_for_status()
    }

    async fn seed_recents(&self, token: &Token) -> Result<(), ApiError> {
        if !self.load_recents().await?.is_empty() {
            log::debug!("recents cache populated; skipping seed");
            return Ok(());
        }
        let me: MeResponse = self.get(token, self.config.me_url()).await?.json()?;
        let channels: ChannelList = self
            .get(token, self.config.user_channels_url(me.id))
            .await?
            .json()?;
        let recents = RecentBoards::from_boards(channels.into_boards());
        if recents.is_empty() {
            log::info!("user has no boards to seed recents with");
            return Ok(());
        }
        log::debug!("seeding recents with {} boards", recents.len());
        store::save(&self.store, RECENTS_KEY, &recents).await?;
        Ok(())
    }

    async fn search_boards(&self, token: &Token, term: &str) -> Result<Vec<Board>, ApiError> {
        let list: ChannelList = self.get(token, self.config.search_url(term)).await?.json()?;
        Ok(list.into_boards())
    }

    async fn create_block(&self, token: &Token, board: &Board, image_url: &str, page_url: &str) -> SaveOutcome {
        let payload = CreateBlock::new(image_url, page_url);
        let request = match HttpRequest::post_json(self.config.channel_blocks_url(board.id), &payload) {
            Ok(request) => request.bearer(token),
            Err(e) => {
                log::error!("failed to build save request: {e}");
                return SaveOutcome::failed(SAVE_FAILED_MESSAGE);
            }
        };
        match self.http.send(request).await {
            Ok(response) if response.is_success() => SaveOutcome::saved(),
            Ok(response) => {
                log::error!("failed to save block: {} {}", response.status, response.body);
                SaveOutcome::failed(format!("Error: {}", response.status))
            }
            Err(e) => {
                log::error!("failed to save block: {e}");
                SaveOutcome::failed(SAVE_FAILED_MESSAGE)
            }
        }
    }

    async fn remember(&self, board: &Board) -> Result<(), StorageError> {
        let mut recents = self.load_recents().await?;
        recents.touch(board.clone());
        store::save(&self.store, RECENTS_KEY, &recents).await
    }
}

#[async_trait::async_trait(?Send)]
impl<H, S> BoardRepository for RestBoardRepository<H, S>
where
    H: HttpClient,
    S: KeyValueStore,
{
    async fn list_recents(&self) -> Vec<Board> {
        match self.load_recents().await {
            Ok(recents) => recents.into_vec(),
            Err(e) => {
                log::error!("failed to read recent boards: {e}");
                Vec::new()
            }
        }
    }

    async fn populate_initial_recents(&self, token: &Token) {
        if let Err(e) = self.seed_recents(token).await {
            log::error!("failed to seed recent boards: {e}");
        }
    }

    async fn search(&self, token: &Token, term: &str) -> Vec<Board> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }
        match self.search_boards(token, term).await {
            Ok(boards) => boards,
            Err(e) => {
                log::error!("board search for {term:?} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn save(&self, token: &Token, board: &Board, image_url: &str, page_url: &str) -> SaveOutcome {
        let outcome = self.create_block(token, board, image_url, page_url).await;
        if outcome.success {
            // The block exists remotely; a cache write failure only costs MRU order.
            if let Err(e) = self.remember(board).await {
                log::error!("failed to update recent boards: {e}");
            }
        }
        outcome
    }
}

#[async_trait::async_trait(?Send)]
impl<T: BoardRepository + ?Sized> BoardRepository for &T {
    async fn list_recents(&self) -> Vec<Board> {
        (**self).list_recents().await
    }

    async fn populate_initial_recents(&self, token: &Token) {
        (**self).populate_initial_recents(token).await;
    }

    async fn search(&self, token: &Token, term: &str) -> Vec<Board> {
        (**self).search(token, term).await
    }

    async fn save(&self, token: &Token, board: &Board, image_url: &str, page_url: &str) -> SaveOutcome {
        (**self).save(token, board, image_url, page_url).await
    }
}
