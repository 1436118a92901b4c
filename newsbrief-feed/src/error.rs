//! Error types for feed collection

use thiserror::Error;

/// Errors that can occur while fetching or parsing a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Feed host returned an error response
    #[error("Feed error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Response body was not a parseable RSS or Atom document
    #[error("Parse error: {0}")]
    Parse(String),
}
