//! Error types for AI calls

use thiserror::Error;

/// Errors that can occur while requesting or decoding an AI completion
#[derive(Debug, Error)]
pub enum AiError {
    /// Completion service unreachable or errored
    #[error("AI request failed: {0}")]
    RequestFailed(String),

    /// Completion arrived but carried no content
    #[error("AI response was empty")]
    EmptyResponse,

    /// Content could not be parsed as the expected JSON shape, even after
    /// the repair pass
    #[error("AI response parse error: {0}")]
    ResponseParse(String),
}
