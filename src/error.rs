//! Errors raised while loading the earthquake feed.
//!
//! Every variant is a fetch failure: the load ends in a terminal error
//! state and nothing is retried. Per-record problems never surface here;
//! the normalizer drops those records instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed URL could not be parsed.
    #[error("invalid feed url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("feed request returned status {status}")]
    Status { status: u16 },

    /// The body was not a JSON feed document.
    #[error("feed body is not a valid JSON document: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
