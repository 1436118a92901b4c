//! Google News RSS client
//!
//! Fetches the Korean Google News topic feeds and normalizes their entries.
//! Google News appends the publisher to every title as `"Title - Publisher"`;
//! normalization strips that suffix and keeps the publisher as the source.

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::debug;

use newsbrief_core::category::general_feed_url;
use newsbrief_core::{NewsCategory, NewsItem};

use crate::error::FeedError;

/// Sentinel source for items whose publisher cannot be determined
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
}

impl GoogleNewsClient {
    /// Create a new Google News client
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .user_agent("Mozilla/5.0 (compatible; Newsbrief/1.0)")
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch one category feed and normalize its entries
    pub async fn fetch_category(&self, category: NewsCategory) -> Result<Vec<NewsItem>, FeedError> {
        let url = category.feed_url();
        debug!("Fetching {} feed: {}", category, url);
        let items = self.fetch_feed(&url, Some(category.label())).await?;
        debug!("Fetched {} items for {}", items.len(), category);
        Ok(items)
    }

    /// Fetch the general headlines feed (uncategorized)
    pub async fn fetch_general(&self) -> Result<Vec<NewsItem>, FeedError> {
        self.fetch_feed(&general_feed_url(), None).await
    }

    /// Fetch a single feed URL and normalize it
    async fn fetch_feed(
        &self,
        url: &str,
        category_label: Option<&str>,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        // Google News serves RSS 2.0; try Atom as a fallback for other hosts
        if let Ok(channel) = rss::Channel::read_from(&content[..]) {
            return Ok(parse_rss_channel(&channel, category_label));
        }

        if let Ok(atom_feed) = atom_syndication::Feed::read_from(&content[..]) {
            return Ok(parse_atom_feed(&atom_feed, category_label));
        }

        Err(FeedError::Parse(format!("Failed to parse feed: {}", url)))
    }
}

impl Default for GoogleNewsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize an RSS channel into NewsItems.
///
/// Entries without a usable link, title, or publication date are dropped.
pub fn parse_rss_channel(channel: &rss::Channel, category_label: Option<&str>) -> Vec<NewsItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let raw_title = item.title()?;
            let link = item.link()?.to_string();
            let pub_date = parse_item_date(item)?;

            // The publisher suffix is always stripped from the title; the
            // structured <source> element, when present, wins over the
            // suffix as the source name
            let (title, title_source) = extract_source_from_title(raw_title);
            let source = item
                .source()
                .and_then(|s| s.title())
                .map(|name| name.trim().to_string())
                .unwrap_or(title_source);

            Some(NewsItem {
                title,
                link,
                pub_date,
                source,
                category: category_label.map(str::to_string),
            })
        })
        .collect()
}

/// Normalize an Atom feed into NewsItems
fn parse_atom_feed(
    feed: &atom_syndication::Feed,
    category_label: Option<&str>,
) -> Vec<NewsItem> {
    feed.entries()
        .iter()
        .filter_map(|entry| {
            let link = entry.links().first().map(|l| l.href().to_string())?;
            let pub_date = entry
                .published()
                .or_else(|| Some(entry.updated()))
                .map(|d| d.with_timezone(&Utc))?;

            let (title, source) = extract_source_from_title(&entry.title().to_string());

            Some(NewsItem {
                title,
                link,
                pub_date,
                source,
                category: category_label.map(str::to_string),
            })
        })
        .collect()
}

/// Resolve an item's publication date.
///
/// Prefers the Dublin Core date extension (RFC3339) when the feed exposes
/// one, then the standard pubDate (RFC2822, with RFC3339 as a second try).
/// Returns None for unparseable or absent dates; callers drop those items.
fn parse_item_date(item: &rss::Item) -> Option<DateTime<Utc>> {
    let dc_date = item
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first())
        .and_then(|d| parse_date(d));

    dc_date.or_else(|| item.pub_date().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// Split a Google News title into (clean title, source) at the LAST `" - "`.
///
/// `"A - B - C"` yields title `"A - B"` and source `"C"`. Titles without the
/// delimiter are returned trimmed, with the unknown-source sentinel.
pub fn extract_source_from_title(title: &str) -> (String, String) {
    if let Some(pos) = title.rfind(" - ") {
        let clean_title = title[..pos].trim().to_string();
        let source = title[pos + 3..].trim().to_string();
        (clean_title, source)
    } else {
        (title.trim().to_string(), UNKNOWN_SOURCE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_source_splits_at_last_delimiter() {
        let (title, source) = extract_source_from_title("A - B - C");
        assert_eq!(title, "A - B");
        assert_eq!(source, "C");
    }

    #[test]
    fn test_extract_source_without_delimiter_uses_sentinel() {
        let (title, source) = extract_source_from_title("  대통령, 국회 연설  ");
        assert_eq!(title, "대통령, 국회 연설");
        assert_eq!(source, UNKNOWN_SOURCE);
    }

    #[test]
    fn test_extract_source_korean_title() {
        let (title, source) = extract_source_from_title("금리 동결 결정 - 연합뉴스");
        assert_eq!(title, "금리 동결 결정");
        assert_eq!(source, "연합뉴스");
    }

    #[test]
    fn test_parse_date_accepts_rfc2822_and_rfc3339() {
        assert!(parse_date("Sat, 01 Mar 2025 09:00:00 GMT").is_some());
        assert!(parse_date("2025-03-01T09:00:00+09:00").is_some());
        assert!(parse_date("next tuesday").is_none());
    }

    #[test]
    fn test_parse_rss_channel_normalizes_items() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Google 뉴스</title>
    <link>https://news.google.com</link>
    <description>정치</description>
    <item>
      <title>예산안 처리 합의 - 한겨레</title>
      <link>https://news.google.com/rss/articles/one</link>
      <pubDate>Sat, 01 Mar 2025 09:00:00 GMT</pubDate>
      <source url="https://hani.co.kr">한겨레</source>
    </item>
    <item>
      <title>단독 보도 - 조선일보</title>
      <link>https://news.google.com/rss/articles/two</link>
      <pubDate>Sat, 01 Mar 2025 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>날짜 없는 기사</title>
      <link>https://news.google.com/rss/articles/three</link>
    </item>
  </channel>
</rss>"#;

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        let items = parse_rss_channel(&channel, Some("정치"));

        // The dateless entry is dropped
        assert_eq!(items.len(), 2);

        // Structured source wins, and the title suffix is still stripped
        assert_eq!(items[0].title, "예산안 처리 합의");
        assert_eq!(items[0].source, "한겨레");

        // No <source> element: suffix heuristic applies
        assert_eq!(items[1].title, "단독 보도");
        assert_eq!(items[1].source, "조선일보");

        assert!(items.iter().all(|i| i.category.as_deref() == Some("정치")));
    }
}
