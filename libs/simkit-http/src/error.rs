use std::time::Duration;
use thiserror::Error;

/// Data-access error types.
///
/// Every variant is `Clone`: the request coalescer hands the *same* failure
/// to every caller that joined an in-flight request, so errors are stored as
/// owned diagnostics rather than boxed sources.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ApiError {
    /// No response was received (connection refused, DNS failure, reset, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Single request attempt timed out
    #[error("request attempt timed out after {0:?}")]
    Timeout(Duration),

    /// Server responded with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Human-readable message decoded from the error body (`message`/`error`
        /// fields) or the canonical status reason
        message: String,
        /// Truncated raw body for diagnostics (see
        /// [`ERROR_BODY_PREVIEW_LIMIT`](crate::security::ERROR_BODY_PREVIEW_LIMIT))
        body_preview: String,
    },

    /// Success status but the response envelope could not be interpreted
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Well-formed coded envelope whose `code` field signals a backend rejection
    #[error("backend rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// Request URL could not be assembled or parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUri { url: String, reason: String },

    /// A context header value could not be encoded
    #[error("invalid value for header '{name}'")]
    InvalidHeader { name: String },

    /// TLS initialization failed at client construction
    #[error("TLS error: {0}")]
    Tls(String),
}

impl ApiError {
    /// Whether the error is transient enough to retry.
    ///
    /// Retryable: no response received (network / attempt timeout) and server
    /// errors in 500..=599. Caller/data errors (4xx), backend rejections and
    /// malformed envelopes are never retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}
