//! Defensive decoding of AI completion content
//!
//! Models occasionally wrap their JSON in markdown code fences or leave a
//! trailing comma before a closing bracket. Both are repaired here before
//! giving up on a response.

use serde::de::DeserializeOwned;

use crate::error::AiError;

/// Decode completion content into `T`.
///
/// Strips markdown fences, attempts a strict parse, then retries once with
/// trailing commas removed. The original parse error is reported when the
/// repaired document still fails.
pub fn decode_json<T: DeserializeOwned>(content: &str) -> Result<T, AiError> {
    let json_str = extract_json(content);

    match serde_json::from_str(&json_str) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let repaired = remove_trailing_commas(&json_str);
            serde_json::from_str(&repaired)
                .map_err(|_| AiError::ResponseParse(first_err.to_string()))
        }
    }
}

/// Extract the JSON payload from content that might contain markdown fences
fn extract_json(content: &str) -> String {
    // Fenced block first
    if let Some(start) = content.find("```json") {
        let start = start + 7;
        if let Some(end) = content[start..].find("```") {
            return content[start..start + end].trim().to_string();
        }
    }

    // Raw object
    if let Some(start) = content.find('{') {
        if let Some(end) = content.rfind('}') {
            if end > start {
                return content[start..=end].to_string();
            }
        }
    }

    content.trim().to_string()
}

/// Remove commas that directly precede a closing bracket or brace
fn remove_trailing_commas(json: &str) -> String {
    match regex::Regex::new(r",\s*([}\]])") {
        Ok(re) => re.replace_all(json, "$1").into_owned(),
        Err(_) => json.to_string(),
    }
}
