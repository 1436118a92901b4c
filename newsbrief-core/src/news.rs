//! News data structures for the briefing pipeline

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One collected article reference.
///
/// The title never carries the `" - <publisher>"` suffix that Google News
/// appends; source extraction strips it during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Cleaned article title
    pub title: String,
    /// Article URL as provided by the feed
    pub link: String,
    /// Publication date (RFC3339 on the wire)
    pub pub_date: DateTime<Utc>,
    /// Publisher name, `"unknown"` when undeterminable
    pub source: String,
    /// Category label, absent for items from the general feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Relative weight of a category's issues within one briefing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// One categorized digest inside a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// Category label (one of the fixed set)
    pub name: String,
    /// Analytical summary of the category's collected news
    pub summary: String,
    /// 3-4 short keywords
    pub key_topics: Vec<String>,
    /// Issue weight for the period
    pub importance: Importance,
}

/// Structured AI summary of one briefing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    /// Overall trend of the period in 2-3 sentences
    pub overview: String,
    /// 5-7 headline issues
    pub highlights: Vec<String>,
    /// Exactly the fixed category set, in configured order
    pub categories: Vec<CategorySummary>,
}

/// Optional long-form editorial column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsColumn {
    pub title: String,
    /// Essay body, paragraphs separated by a blank line
    pub body: String,
}

/// One persisted daily snapshot, keyed by calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNewsData {
    pub generated_at: DateTime<Utc>,
    /// `%Y-%m-%d`
    pub date: NaiveDate,
    pub summary: NewsSummary,
    pub articles: Vec<NewsItem>,
    /// Best-effort; `null` when column generation failed or was skipped
    pub column: Option<NewsColumn>,
}

/// One persisted weekly snapshot, keyed by its (start, end) date pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyNewsData {
    pub generated_at: DateTime<Utc>,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub summary: NewsSummary,
    pub articles: Vec<NewsItem>,
    pub column: Option<NewsColumn>,
}

/// Briefing period kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
}

impl Period {
    /// Korean period word used in prompts and placeholder summaries
    pub fn korean(&self) -> &'static str {
        match self {
            Period::Daily => "오늘",
            Period::Weekly => "이번 주",
        }
    }

    /// Default per-category article limit for this period
    pub fn default_per_category(&self) -> usize {
        match self {
            Period::Daily => 4,
            Period::Weekly => 6,
        }
    }

    /// Default recency window in days
    pub fn default_days(&self) -> i64 {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_summary() -> NewsSummary {
        NewsSummary {
            overview: "조용한 하루였습니다.".to_string(),
            highlights: vec!["이슈".to_string()],
            categories: vec![CategorySummary {
                name: "정치".to_string(),
                summary: "여야 협상이 이어졌습니다.".to_string(),
                key_topics: vec!["협상".to_string()],
                importance: Importance::Medium,
            }],
        }
    }

    #[test]
    fn test_news_item_wire_names() {
        let item = NewsItem {
            title: "제목".to_string(),
            link: "https://news.example/a".to_string(),
            pub_date: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            source: "연합뉴스".to_string(),
            category: Some("정치".to_string()),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["pubDate"], "2025-03-01T09:00:00Z");
        assert_eq!(json["source"], "연합뉴스");
        assert!(json.get("pub_date").is_none());
    }

    #[test]
    fn test_uncategorized_item_omits_category() {
        let item = NewsItem {
            title: "제목".to_string(),
            link: "https://news.example/b".to_string(),
            pub_date: Utc::now(),
            source: "unknown".to_string(),
            category: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_daily_snapshot_serializes_null_column() {
        let data = DailyNewsData {
            generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 22, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            summary: sample_summary(),
            articles: vec![],
            column: None,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["date"], "2025-03-01");
        assert_eq!(json["column"], serde_json::Value::Null);
        assert!(json.get("generatedAt").is_some());
    }

    #[test]
    fn test_importance_is_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Importance::High).unwrap(),
            "\"high\""
        );
        let parsed: Importance = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Importance::Low);
    }
}
