//! Typed errors for the listing extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while producing a [`ListingData`](crate::ListingData).
///
/// Field-level extraction never fails; these only cover getting the page and
/// building the parser.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The storefront page could not be retrieved
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A compiled-in selector failed to parse
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// Errors that can occur while fetching a storefront page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be built from the template
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The page did not arrive within the fetch timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body-read failure
    #[error("HTTP error: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the rewrite gateway.
///
/// Any failure on the rewrite path collapses into one of these; the caller
/// decides the fallback policy.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The text-generation provider failed
    #[error("provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response contained no brace-delimited block
    #[error("no structured payload in response")]
    NoStructuredPayload,

    /// The block was not valid JSON of the expected shape
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A mandatory field was absent, null or empty
    #[error("missing field: {field}")]
    MissingField { field: &'static str },
}

impl RewriteError {
    /// Wrap any provider-side error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Box::new(err))
    }
}

/// Identifier validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsinError {
    /// No identifier supplied
    #[error("ASIN is required")]
    Missing,

    /// Not ten ASCII alphanumerics
    #[error("ASIN must be 10 alphanumeric characters: {0}")]
    Malformed(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for rewrite operations.
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;
