//! Long-form editorial column generation
//!
//! An independent completion over the same item set. Callers treat any
//! failure here as "no column"; nothing in this module is load-bearing for
//! the summary path.

use serde::Deserialize;
use tracing::{info, instrument};

use newsbrief_core::{NewsColumn, NewsItem, Period};

use crate::client::OpenAiBriefingClient;
use crate::error::AiError;
use crate::response::decode_json;
use crate::summarizer::build_headlines_block;

pub const COLUMN_SYSTEM_PROMPT: &str =
    "당신은 시사 칼럼니스트입니다. 뉴스의 흐름을 통찰력 있게 해석하는 칼럼을 씁니다.";

fn column_prompt(period: Period, headlines: &str) -> String {
    let period_word = period.korean();

    format!(
        r#"다음은 {period_word} 주요 뉴스 헤드라인입니다:

{headlines}

위 뉴스 전반을 관통하는 흐름을 주제로 한국어 칼럼 한 편을 작성해주세요.

요구사항:
- 서론, 본론, 결론의 구조를 갖춘 에세이로 작성하세요.
- 전체 분량은 1200-1800자로 하세요.
- 문단 사이는 빈 줄로 구분하세요.
- 제목은 독자의 관심을 끌 수 있도록 간결하게 지으세요.

다음 JSON 형식으로만 반환하고 다른 텍스트는 포함하지 마세요:

{{
  "title": "칼럼 제목",
  "body": "칼럼 본문"
}}"#
    )
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    title: String,
    body: String,
}

/// Generate the editorial column for the collected items
#[instrument(skip(client, items))]
pub(crate) async fn generate_column(
    client: &OpenAiBriefingClient,
    items: &[NewsItem],
    period: Period,
) -> Result<NewsColumn, AiError> {
    info!("Generating column over {} items", items.len());

    let headlines = build_headlines_block(items);
    let prompt = column_prompt(period, &headlines);
    let content = client.chat_json(COLUMN_SYSTEM_PROMPT, prompt).await?;

    let raw: RawColumn = decode_json(&content)?;

    Ok(NewsColumn {
        title: raw.title,
        body: raw.body,
    })
}
