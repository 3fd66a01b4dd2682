//! Answer extraction from a `generateContent` response.
//!
//! The provider returns a loosely structured document:
//!
//! ```json
//! { "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }
//! ```
//!
//! Only the first candidate is used. When the structure is absent the
//! provider's `error.message` is returned instead, and fixed placeholders
//! guarantee the result is never empty.

use serde_json::Value;
use tracing::warn;

/// Used when neither candidate text nor an error message is present.
pub const UNPARSEABLE_ANSWER: &str = "Could not parse answer from Gemini.";

/// Used when extraction succeeded but produced no text.
pub const EMPTY_ANSWER: &str = "Gemini returned an empty answer.";

/// Extracts a plain-text answer from a decoded response body.
///
/// Always returns non-empty text.
pub fn extract_answer(body: &Value) -> String {
    let text = match first_candidate_text(body) {
        Some(text) => text,
        None => {
            warn!("could not extract text from provider response structure");
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| UNPARSEABLE_ANSWER.to_owned())
        }
    };

    if text.trim().is_empty() {
        EMPTY_ANSWER.to_owned()
    } else {
        text
    }
}

/// Concatenated, trimmed text of all parts of the first candidate.
///
/// `None` when candidates, content or parts are missing or empty.
fn first_candidate_text(body: &Value) -> Option<String> {
    let content = body.get("candidates")?.as_array()?.first()?.get("content")?;
    let parts = content.get("parts")?.as_array()?;
    if parts.is_empty() {
        return None;
    }

    let joined: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    Some(joined.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn joins_parts_of_first_candidate() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  A hook " }, { "text": "is...\n" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        });
        assert_eq!(extract_answer(&body), "A hook is...");
    }

    #[test]
    fn parts_without_text_are_skipped() {
        let body = json!({
            "candidates": [ { "content": { "parts": [ { "inlineData": {} }, { "text": "ok" } ] } } ]
        });
        assert_eq!(extract_answer(&body), "ok");
    }

    #[test]
    fn missing_candidates_uses_placeholder() {
        assert_eq!(extract_answer(&json!({})), UNPARSEABLE_ANSWER);
        assert_eq!(extract_answer(&json!({ "candidates": [] })), UNPARSEABLE_ANSWER);
        assert_eq!(
            extract_answer(&json!({ "candidates": [ { "finishReason": "SAFETY" } ] })),
            UNPARSEABLE_ANSWER
        );
        assert_eq!(extract_answer(&json!([1, 2, 3])), UNPARSEABLE_ANSWER);
    }

    #[test]
    fn provider_error_message_is_surfaced() {
        let body = json!({ "error": { "code": 400, "message": "API key not valid." } });
        assert_eq!(extract_answer(&body), "API key not valid.");
    }

    #[test]
    fn empty_text_becomes_empty_placeholder() {
        let body = json!({ "candidates": [ { "content": { "parts": [ { "text": "   " } ] } } ] });
        assert_eq!(extract_answer(&body), EMPTY_ANSWER);

        let body = json!({ "error": { "message": "" } });
        assert_eq!(extract_answer(&body), EMPTY_ANSWER);
    }
}
