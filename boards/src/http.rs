//! Transport-neutral HTTP request/response types.
//!
//! SYSTEM CONTEXT
//! ==============
//! The repository and token provider build [`HttpRequest`]s and hand them to
//! an [`HttpClient`]. The browser build sends them with `gloo-net`; tests
//! answer them from canned responses.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent as `application/json`.
    Json(serde_json::Value),
    /// Pre-encoded `application/x-www-form-urlencoded` string.
    Form(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), headers: Vec::new(), body: None }
    }

    /// A `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `payload` cannot be serialized.
    pub fn post_json<T: Serialize>(url: impl Into<String>, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self { method: Method::Post, url: url.into(), headers: Vec::new(), body: Some(Body::Json(value)) })
    }

    /// A `POST` with a form-encoded body built from `pairs`.
    #[must_use]
    pub fn post_form<'a>(url: impl Into<String>, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        Self { method: Method::Post, url: url.into(), headers: Vec::new(), body: Some(Body::Form(encoded)) }
    }

    /// Attach `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(mut self, token: &Token) -> Self {
        self.headers
            .push(("Authorization".to_owned(), format!("Bearer {}", token.as_str())));
        self
    }

    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`ApiError::Status`] unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns the status and body of a non-success response.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status { status: self.status, body: self.body })
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Sends requests. Implementations report transport failures as
/// [`ApiError::Transport`] and return every HTTP status as a response.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// Send `request` and wait for the full response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}
