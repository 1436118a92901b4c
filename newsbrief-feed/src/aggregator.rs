//! Category aggregation
//!
//! Fetches every configured category feed concurrently, filters each to the
//! recency window, caps it, and merges the survivors into one globally
//! date-sorted list. A single failing category degrades to an empty list;
//! only a total outage reaches the general-feed fallback.

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use newsbrief_core::{NewsCategory, NewsItem};

use crate::error::FeedError;
use crate::google_news::GoogleNewsClient;

impl GoogleNewsClient {
    /// Fetch all configured category feeds and merge the results.
    ///
    /// `per_category` caps each category after recency filtering; `days` is
    /// the lookback window. Category failures are logged and treated as
    /// empty. When every category comes back empty, the general headlines
    /// feed is fetched instead and up to `per_category * category count`
    /// uncategorized items are returned; only a failure of that fallback
    /// fetch is an error.
    pub async fn fetch_all_category_news(
        &self,
        per_category: usize,
        days: i64,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let cutoff = Utc::now() - Duration::days(days);

        let results = join_all(
            NewsCategory::ALL
                .iter()
                .map(|category| self.fetch_category(*category)),
        )
        .await;

        let merged = merge_category_results(results, cutoff, per_category);

        if merged.is_empty() {
            warn!("All category feeds empty, falling back to general feed");
            let mut items = self.fetch_general().await?;
            items.truncate(per_category * NewsCategory::ALL.len());
            return Ok(items);
        }

        info!("Aggregated {} articles across categories", merged.len());
        Ok(merged)
    }
}

/// Merge per-category fetch outcomes into one date-sorted list.
///
/// Failed categories contribute nothing; each successful category is
/// recency-filtered and capped before the global stable sort.
fn merge_category_results(
    results: Vec<Result<Vec<NewsItem>, FeedError>>,
    cutoff: DateTime<Utc>,
    per_category: usize,
) -> Vec<NewsItem> {
    let mut merged = Vec::new();

    for (category, result) in NewsCategory::ALL.iter().zip(results) {
        match result {
            Ok(items) => {
                let kept = filter_and_cap(items, cutoff, per_category);
                info!("{}: {} items within window", category, kept.len());
                merged.extend(kept);
            }
            Err(e) => {
                warn!("Failed to fetch {} feed: {}", category, e);
            }
        }
    }

    sort_newest_first(&mut merged);
    merged
}

/// Keep items within the recency window, newest first, capped at `limit`
fn filter_and_cap(
    items: Vec<NewsItem>,
    cutoff: DateTime<Utc>,
    limit: usize,
) -> Vec<NewsItem> {
    let mut kept: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| item.pub_date >= cutoff)
        .collect();
    sort_newest_first(&mut kept);
    kept.truncate(limit);
    kept
}

/// Stable descending sort by publication date; ties keep their relative order
fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(title: &str, pub_date: DateTime<Utc>, category: Option<&str>) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://news.example/{}", title),
            pub_date,
            source: "연합뉴스".to_string(),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_recency_window_boundary() {
        let now = Utc::now();
        let cutoff = now - Duration::days(1);
        let items = vec![
            item("recent", now - Duration::hours(23), Some("정치")),
            item("stale", now - Duration::hours(25), Some("정치")),
        ];

        let kept = filter_and_cap(items, cutoff, 10);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "recent");
    }

    #[test]
    fn test_per_category_cap_keeps_newest() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let items = vec![
            item("third", base - Duration::hours(3), Some("경제")),
            item("first", base, Some("경제")),
            item("second", base - Duration::hours(1), Some("경제")),
        ];

        let kept = filter_and_cap(items, base - Duration::days(1), 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "first");
        assert_eq!(kept[1].title, "second");
    }

    #[test]
    fn test_merged_sort_is_global_and_ignores_fetch_order() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let cutoff = base - Duration::days(1);

        // Politics completes first but its item is older than economy's
        let results = vec![
            Ok(vec![item("older-politics", base - Duration::hours(2), Some("정치"))]),
            Ok(vec![item("newer-economy", base, Some("경제"))]),
            Ok(vec![]),
            Ok(vec![]),
            Ok(vec![]),
        ];

        let merged = merge_category_results(results, cutoff, 4);
        assert_eq!(merged[0].title, "newer-economy");
        assert_eq!(merged[1].title, "older-politics");
    }

    #[test]
    fn test_failed_category_does_not_poison_the_others() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let cutoff = base - Duration::days(1);

        let results = vec![
            Err(FeedError::RequestFailed("timeout".to_string())),
            Ok(vec![item("economy", base, Some("경제"))]),
            Err(FeedError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
            Ok(vec![]),
            Ok(vec![]),
        ];

        let merged = merge_category_results(results, cutoff, 4);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "economy");
    }

    #[test]
    fn test_all_failures_merge_to_empty() {
        let cutoff = Utc::now() - Duration::days(1);
        let results = (0..NewsCategory::ALL.len())
            .map(|_| Err(FeedError::RequestFailed("down".to_string())))
            .collect();

        let merged = merge_category_results(results, cutoff, 4);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_sort_is_stable_on_equal_dates() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut merged = vec![
            item("tie-a", base, Some("정치")),
            item("tie-b", base, Some("경제")),
            item("tie-c", base, Some("사회")),
        ];

        sort_newest_first(&mut merged);
        let titles: Vec<&str> = merged.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["tie-a", "tie-b", "tie-c"]);
    }
}
