//! AI summarization for the briefing pipeline
//!
//! Wraps the OpenAI chat-completion API behind the [`BriefingModel`] trait:
//! one call produces the structured period summary, an independent call
//! produces the long-form column. Responses are decoded defensively (fence
//! stripping, trailing-comma repair) and the summary is post-processed so
//! the fixed category set is always fully populated.

pub mod client;
pub mod column;
pub mod error;
pub mod model;
pub mod response;
pub mod summarizer;

pub use client::OpenAiBriefingClient;
pub use error::AiError;
pub use model::BriefingModel;
