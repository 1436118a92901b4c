//! The briefing pipeline

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{info, instrument, warn};

use newsbrief_ai::{AiError, BriefingModel};
use newsbrief_core::{DailyNewsData, NewsColumn, NewsItem, Period, WeeklyNewsData};
use newsbrief_feed::{FeedError, GoogleNewsClient};

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),
}

/// One-shot briefing pipeline over injected clients
pub struct NewsPipeline<M> {
    feed: GoogleNewsClient,
    model: M,
}

impl<M: BriefingModel> NewsPipeline<M> {
    pub fn new(feed: GoogleNewsClient, model: M) -> Self {
        Self { feed, model }
    }

    /// Run the full daily pipeline: collect, summarize, column, assemble
    #[instrument(skip(self))]
    pub async fn run_daily(
        &self,
        per_category: usize,
        days: i64,
    ) -> Result<DailyNewsData, PipelineError> {
        let articles = self.collect(per_category, days).await?;
        self.build_daily(articles).await
    }

    /// Run the full weekly pipeline
    #[instrument(skip(self))]
    pub async fn run_weekly(
        &self,
        per_category: usize,
        days: i64,
    ) -> Result<WeeklyNewsData, PipelineError> {
        let articles = self.collect(per_category, days).await?;
        self.build_weekly(articles, days).await
    }

    async fn collect(&self, per_category: usize, days: i64) -> Result<Vec<NewsItem>, PipelineError> {
        let articles = self.feed.fetch_all_category_news(per_category, days).await?;
        info!("Collected {} articles", articles.len());
        Ok(articles)
    }

    /// Summarize pre-collected articles into a daily snapshot.
    ///
    /// Summarization failure aborts the run; column failure degrades to
    /// `column = None`.
    pub async fn build_daily(
        &self,
        articles: Vec<NewsItem>,
    ) -> Result<DailyNewsData, PipelineError> {
        let summary = self.model.summarize(&articles, Period::Daily).await?;
        let column = self.try_column(&articles, Period::Daily).await;

        let now = Utc::now();
        Ok(DailyNewsData {
            generated_at: now,
            date: now.date_naive(),
            summary,
            articles,
            column,
        })
    }

    /// Summarize pre-collected articles into a weekly snapshot
    pub async fn build_weekly(
        &self,
        articles: Vec<NewsItem>,
        days: i64,
    ) -> Result<WeeklyNewsData, PipelineError> {
        let summary = self.model.summarize(&articles, Period::Weekly).await?;
        let column = self.try_column(&articles, Period::Weekly).await;

        let now = Utc::now();
        Ok(WeeklyNewsData {
            generated_at: now,
            week_start: (now - Duration::days(days)).date_naive(),
            week_end: now.date_naive(),
            summary,
            articles,
            column,
        })
    }

    async fn try_column(&self, articles: &[NewsItem], period: Period) -> Option<NewsColumn> {
        match self.model.generate_column(articles, period).await {
            Ok(column) => Some(column),
            Err(e) => {
                warn!("Column generation failed, continuing without column: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use newsbrief_core::{CategorySummary, Importance, NewsCategory, NewsSummary};

    struct FakeModel {
        fail_summary: bool,
        fail_column: bool,
    }

    fn fixed_summary() -> NewsSummary {
        NewsSummary {
            overview: "전반적으로 조용했습니다.".to_string(),
            highlights: vec!["이슈".to_string()],
            categories: NewsCategory::ALL
                .iter()
                .map(|c| CategorySummary {
                    name: c.label().to_string(),
                    summary: "요약".to_string(),
                    key_topics: vec![],
                    importance: Importance::Low,
                })
                .collect(),
        }
    }

    #[async_trait]
    impl BriefingModel for FakeModel {
        async fn summarize(
            &self,
            _items: &[NewsItem],
            _period: Period,
        ) -> Result<NewsSummary, AiError> {
            if self.fail_summary {
                return Err(AiError::EmptyResponse);
            }
            Ok(fixed_summary())
        }

        async fn generate_column(
            &self,
            _items: &[NewsItem],
            _period: Period,
        ) -> Result<NewsColumn, AiError> {
            if self.fail_column {
                return Err(AiError::ResponseParse("broken".to_string()));
            }
            Ok(NewsColumn {
                title: "칼럼".to_string(),
                body: "본문".to_string(),
            })
        }
    }

    fn pipeline(fail_summary: bool, fail_column: bool) -> NewsPipeline<FakeModel> {
        NewsPipeline::new(
            GoogleNewsClient::new(),
            FakeModel {
                fail_summary,
                fail_column,
            },
        )
    }

    fn articles() -> Vec<NewsItem> {
        vec![NewsItem {
            title: "기사".to_string(),
            link: "https://news.example/a".to_string(),
            pub_date: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            source: "연합뉴스".to_string(),
            category: Some("정치".to_string()),
        }]
    }

    #[tokio::test]
    async fn test_column_failure_does_not_abort_the_run() {
        let data = pipeline(false, true).build_daily(articles()).await.unwrap();

        assert!(data.column.is_none());
        assert_eq!(data.summary.categories.len(), 5);
        assert_eq!(data.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_column_success_is_kept() {
        let data = pipeline(false, false).build_daily(articles()).await.unwrap();
        assert_eq!(data.column.unwrap().title, "칼럼");
    }

    #[tokio::test]
    async fn test_summary_failure_aborts_the_run() {
        let err = pipeline(true, false)
            .build_daily(articles())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Ai(_)));
    }

    #[tokio::test]
    async fn test_weekly_snapshot_spans_the_lookback_window() {
        let data = pipeline(false, false)
            .build_weekly(articles(), 7)
            .await
            .unwrap();

        assert_eq!((data.week_end - data.week_start).num_days(), 7);
        assert_eq!(data.week_end, data.generated_at.date_naive());
    }
}
