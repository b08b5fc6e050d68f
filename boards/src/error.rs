//! Error types for API, storage, auth, and configuration failures.
//!
//! ERROR HANDLING
//! ==============
//! These errors never cross the `BoardRepository` / `TokenProvider` surfaces.
//! They exist so internal helpers can use `?`, and are logged and collapsed
//! into empty, failed, or absent results at those boundaries.

/// Failures talking to the collection API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// A request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// Reading or writing the local cache failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures reading or writing durable storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage area is not reachable from this context.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A value could not be serialized for storage.
    #[error("storage encode failed: {0}")]
    Encode(String),

    /// A stored value did not match the expected shape.
    #[error("storage decode failed: {0}")]
    Decode(String),
}

/// Failures during the interactive authorization handshake.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The browser did not provide a redirect URL for the flow.
    #[error("redirect URL unavailable")]
    MissingRedirect,

    /// The user closed the auth window or the browser rejected the flow.
    #[error("authorization flow failed: {0}")]
    Flow(String),

    /// The redirect came back without an authorization code.
    #[error("authorization code missing from redirect: {0}")]
    MissingCode(String),

    /// The code-for-token exchange failed.
    #[error("token exchange failed: {0}")]
    Exchange(#[from] ApiError),

    /// The exchange succeeded but carried no access token.
    #[error("access token missing from token response")]
    MissingAccessToken,

    /// Persisting or reading the cached token failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
