//! Error type for document store operations.

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("document store returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The store asked us to back off.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    /// A document body did not match the expected shape.
    #[error("failed to decode document {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
