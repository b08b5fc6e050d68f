//! Bearer credentials and the OAuth authorization-code flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the background script runs [`OAuthTokenProvider`]; content scripts
//! ask it for a token over runtime messaging (see [`crate::message`]). The
//! token is cached in durable storage, so the interactive handshake happens
//! at most once per storage lifetime.
//!
//! ERROR HANDLING
//! ==============
//! Every handshake failure, including the user closing the auth window, is
//! logged and reported as "no token". Callers never see an error.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::fmt;

use url::Url;

use crate::api::TokenExchange;
use crate::config::ApiConfig;
use crate::error::AuthError;
use crate::http::{HttpClient, HttpRequest};
use crate::store::{self, KeyValueStore};

/// Durable storage key holding the cached token.
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer credential. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Yields the bearer credential used for every API call.
#[async_trait::async_trait(?Send)]
pub trait TokenProvider {
    /// The cached token, or a fresh one from the interactive flow. `None`
    /// when the user cancels or anything in the handshake fails.
    async fn acquire_token(&self) -> Option<Token>;
}

/// The browser's interactive web-auth window.
#[async_trait::async_trait(?Send)]
pub trait AuthFlow {
    /// Redirect URL registered for this extension, if the browser exposes one.
    fn redirect_url(&self) -> Option<String>;

    /// Open `authorize_url` and resolve with the final redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Flow`] when the user closes the window or the
    /// browser rejects the flow.
    async fn launch(&self, authorize_url: &str) -> Result<String, AuthError>;
}

/// Token provider backed by the authorization-code flow and durable storage.
pub struct OAuthTokenProvider<F, H, S> {
    config: ApiConfig,
    flow: F,
    http: H,
    store: S,
}

impl<F, H, S> OAuthTokenProvider<F, H, S>
where
    F: AuthFlow,
    H: HttpClient,
    S: KeyValueStore,
{
    pub fn new(config: ApiConfig, flow: F, http: H, store: S) -> Self {
        Self { config, flow, http, store }
    }

    async fn cached_or_authorize(&self) -> Result<Token, AuthError> {
        let redirect_url = self.flow.redirect_url().ok_or(AuthError::MissingRedirect)?;
        if let Some(raw) = store::load::<_, String>(&self.store, TOKEN_KEY).await? {
            if !raw.is_empty() {
                return Ok(Token::new(raw));
            }
        }

        let redirect = self
            .flow
            .launch(&self.config.authorize_url(&redirect_url))
            .await?;
        let code = extract_code(&redirect)?;
        let token = self.exchange_code(&code, &redirect_url).await?;
        store::save(&self.store, TOKEN_KEY, &token.as_str()).await?;
        log::info!("authorization complete; token cached");
        Ok(token)
    }

    async fn exchange_code(&self, code: &str, redirect_url: &str) -> Result<Token, AuthError> {
        let request = HttpRequest::post_form(
            self.config.token_url(),
            [
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_url),
            ],
        );
        let response = self.http.send(request).await?.error_for_status()?;
        let reply: TokenExchange = response.json()?;
        match reply.access_token {
            Some(raw) if !raw.is_empty() => Ok(Token::new(raw)),
            _ => Err(AuthError::MissingAccessToken),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl<F, H, S> TokenProvider for OAuthTokenProvider<F, H, S>
where
    F: AuthFlow,
    H: HttpClient,
    S: KeyValueStore,
{
    async fn acquire_token(&self) -> Option<Token> {
        match self.cached_or_authorize().await {
            Ok(token) => Some(token),
            Err(e) => {
                log::error!("token unavailable: {e}");
                None
            }
        }
    }
}

/// Pull the `code` query parameter out of the auth redirect.
///
/// # Errors
///
/// Returns [`AuthError::MissingCode`] if the URL does not parse or carries no
/// non-empty `code`.
pub fn extract_code(redirect: &str) -> Result<String, AuthError> {
    let url = Url::parse(redirect).map_err(|_| AuthError::MissingCode(redirect.to_owned()))?;
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AuthError::MissingCode(redirect.to_owned()))
}

#[async_trait::async_trait(?Send)]
impl<T: TokenProvider + ?Sized> TokenProvider for &T {
    async fn acquire_token(&self) -> Option<Token> {
        (**self).acquire_token().await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: AuthFlow + ?Sized> AuthFlow for &T {
    fn redirect_url(&self) -> Option<String> {
        (**self).redirect_url()
    }

    async fn launch(&self, authorize_url: &str) -> Result<String, AuthError> {
        (**self).launch(authorize_url).await
    }
}
