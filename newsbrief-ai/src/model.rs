//! The model seam the pipeline is written against

use async_trait::async_trait;

use newsbrief_core::{NewsColumn, NewsItem, NewsSummary, Period};

use crate::error::AiError;

/// An AI backend capable of producing briefing artifacts.
///
/// The two calls are independent: a column failure must never be allowed to
/// disturb summarization, and the orchestrator treats it as best-effort.
#[async_trait]
pub trait BriefingModel: Send + Sync {
    /// Produce the structured period summary for the collected items
    async fn summarize(&self, items: &[NewsItem], period: Period)
        -> Result<NewsSummary, AiError>;

    /// Produce the long-form editorial column for the collected items
    async fn generate_column(
        &self,
        items: &[NewsItem],
        period: Period,
    ) -> Result<NewsColumn, AiError>;
}
