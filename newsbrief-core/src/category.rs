//! The fixed category set for news aggregation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL for Google News Korea topic feeds
const TOPIC_FEED_BASE: &str = "https://news.google.com/rss/headlines/section/topic";

/// Locale query string shared by every feed URL
const FEED_LOCALE: &str = "hl=ko&gl=KR&ceid=KR:ko";

/// The deployment's fixed news categories, in display order.
///
/// Every generated summary enumerates exactly these categories, in this
/// order, whether or not articles were collected for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    /// 정치
    Politics,
    /// 경제
    Economy,
    /// 사회
    Society,
    /// 국제
    World,
    /// IT/과학
    Tech,
}

impl NewsCategory {
    /// All categories in configured order
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Politics,
        NewsCategory::Economy,
        NewsCategory::Society,
        NewsCategory::World,
        NewsCategory::Tech,
    ];

    /// Label shown to readers and used in summary output
    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Politics => "정치",
            NewsCategory::Economy => "경제",
            NewsCategory::Society => "사회",
            NewsCategory::World => "국제",
            NewsCategory::Tech => "IT/과학",
        }
    }

    /// Google News topic identifier backing this category
    pub fn topic_id(&self) -> &'static str {
        match self {
            NewsCategory::Politics => "POLITICS",
            NewsCategory::Economy => "BUSINESS",
            NewsCategory::Society => "NATION",
            NewsCategory::World => "WORLD",
            NewsCategory::Tech => "TECHNOLOGY",
        }
    }

    /// RSS feed URL for this category
    pub fn feed_url(&self) -> String {
        format!("{}/{}?{}", TOPIC_FEED_BASE, self.topic_id(), FEED_LOCALE)
    }

    /// Look up a category by its Korean label
    pub fn from_label(label: &str) -> Option<NewsCategory> {
        Self::ALL.iter().copied().find(|c| c.label() == label.trim())
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// General (uncategorized) headlines feed, used when every category fails
pub fn general_feed_url() -> String {
    format!("https://news.google.com/rss?{}", FEED_LOCALE)
}

/// Label used for items that did not come from a category feed
pub const UNCATEGORIZED_LABEL: &str = "종합";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_fixed() {
        let labels: Vec<&str> = NewsCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["정치", "경제", "사회", "국제", "IT/과학"]);
    }

    #[test]
    fn test_feed_url_carries_locale() {
        let url = NewsCategory::Politics.feed_url();
        assert!(url.contains("/POLITICS?"));
        assert!(url.contains("ceid=KR:ko"));
    }

    #[test]
    fn test_from_label_round_trips() {
        for category in NewsCategory::ALL {
            assert_eq!(NewsCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(NewsCategory::from_label("스포츠"), None);
    }
}
