//! Structured period summaries
//!
//! Builds the headline prompt, runs the completion, and enforces the fixed
//! category invariant: the returned summary always enumerates exactly the
//! configured categories, in configured order, whatever the model answered.

use serde::Deserialize;
use tracing::{info, instrument};

use newsbrief_core::category::UNCATEGORIZED_LABEL;
use newsbrief_core::{CategorySummary, Importance, NewsCategory, NewsItem, NewsSummary, Period};

use crate::client::OpenAiBriefingClient;
use crate::error::AiError;
use crate::response::decode_json;

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "당신은 뉴스 분석 전문가입니다. 주어진 뉴스 헤드라인을 분석하여 핵심 내용을 요약합니다.";

/// Enumerate the collected items for the prompt.
///
/// Format per item: `"{i}. [{category}] {title} ({source})\n- {link}"`,
/// 1-based, with `종합` standing in for uncategorized items.
pub fn build_headlines_block(items: &[NewsItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. [{}] {} ({})\n- {}",
                i + 1,
                item.category.as_deref().unwrap_or(UNCATEGORIZED_LABEL),
                item.title,
                item.source,
                item.link
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_prompt(period: Period, headlines: &str) -> String {
    let period_word = period.korean();
    let category_names = NewsCategory::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.label()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"다음은 {period_word} 주요 뉴스 헤드라인입니다:

{headlines}

위 뉴스를 분석하여 다음 JSON 형식으로 한국어 요약을 작성해주세요:

{{
  "overview": "{period_word} 뉴스의 전반적인 동향을 2-3문장(100-200자)으로 요약",
  "highlights": ["주요 이슈 1", "주요 이슈 2", "주요 이슈 3", "주요 이슈 4", "주요 이슈 5"],
  "categories": [
    {{
      "name": "카테고리명",
      "summary": "해당 카테고리의 주요 동향을 2-3문장(80-150자)으로 요약",
      "keyTopics": ["핵심 토픽 1", "핵심 토픽 2", "핵심 토픽 3"],
      "importance": "high 또는 medium 또는 low"
    }}
  ]
}}

규칙:
- categories에는 다음 카테고리를 정확히 이 순서대로 모두 포함하세요: {category_names}
- highlights는 5-7개로 작성하세요.
- keyTopics는 카테고리마다 3-4개의 짧은 키워드로 작성하세요.
- 해당 분야 뉴스가 없는 카테고리는 그 사실을 summary에 적고 importance를 "low"로 하세요.
- 요약은 객관적이고 간결하게 작성하되, 일반 독자가 이해하기 쉽도록 해주세요.
- JSON만 반환하고 다른 텍스트는 포함하지 마세요."#
    )
}

/// Summary shape as the model returns it, before invariant enforcement
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    #[serde(default)]
    overview: String,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    name: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    key_topics: Vec<String>,
    #[serde(default)]
    importance: Option<Importance>,
}

/// Map whatever categories the model produced onto the fixed set.
///
/// Missing categories are synthesized with a deterministic placeholder;
/// entries outside the fixed set are discarded; the result is always the
/// full set in configured order.
fn ensure_fixed_categories(raw: Vec<RawCategory>, period: Period) -> Vec<CategorySummary> {
    NewsCategory::ALL
        .iter()
        .map(|category| {
            match raw.iter().find(|c| c.name.trim() == category.label()) {
                Some(found) => CategorySummary {
                    name: category.label().to_string(),
                    summary: found.summary.clone(),
                    key_topics: found.key_topics.clone(),
                    importance: found.importance.unwrap_or(Importance::Low),
                },
                None => placeholder_summary(*category, period),
            }
        })
        .collect()
}

fn placeholder_summary(category: NewsCategory, period: Period) -> CategorySummary {
    CategorySummary {
        name: category.label().to_string(),
        summary: format!("{} 해당 분야 수집 뉴스가 없습니다.", period.korean()),
        key_topics: Vec::new(),
        importance: Importance::Low,
    }
}

/// Summarize the collected items for the given period
#[instrument(skip(client, items))]
pub(crate) async fn summarize(
    client: &OpenAiBriefingClient,
    items: &[NewsItem],
    period: Period,
) -> Result<NewsSummary, AiError> {
    info!("Summarizing {} items", items.len());

    let headlines = build_headlines_block(items);
    let prompt = summary_prompt(period, &headlines);
    let content = client.chat_json(SUMMARY_SYSTEM_PROMPT, prompt).await?;

    let raw: RawSummary = decode_json(&content)?;

    Ok(NewsSummary {
        overview: raw.overview,
        highlights: raw.highlights,
        categories: ensure_fixed_categories(raw.categories, period),
    })
}
