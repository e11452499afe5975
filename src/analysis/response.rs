//! Chat completion response parsing.

use crate::analysis::types::TokenUsage;
use crate::error::{Result, VisionError};
use serde::Deserialize;

/// Text and metadata pulled from a chat completion response.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedAnalysis {
    /// Trimmed, non-empty generated text.
    pub content: String,
    /// Model reported by the API.
    pub model: Option<String>,
    /// Finish reason of the first choice.
    pub finish_reason: Option<String>,
    /// Token usage.
    pub usage: Option<TokenUsage>,
}

/// Extracts the generated text from a raw response body.
///
/// Any shape problem or blank content is a [`VisionError::ResponseFormat`].
pub fn extract_analysis(body: &str) -> Result<ExtractedAnalysis> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| VisionError::ResponseFormat(format!("failed to parse response: {e}")))?;

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        VisionError::ResponseFormat("No analysis returned: response has no choices".into())
    })?;

    let content = choice
        .message
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            VisionError::ResponseFormat("No analysis returned: message content is empty".into())
        })?;

    Ok(ExtractedAnalysis {
        content,
        model: response.model,
        finish_reason: choice.finish_reason,
        usage: response.usage,
    })
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_error(body: &str) -> String {
        match extract_analysis(body) {
            Err(VisionError::ResponseFormat(msg)) => msg,
            other => panic!("expected ResponseFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_extracts_trimmed_content() {
        let body = r#"{
            "model": "grok-4-1-fast-non-reasoning",
            "choices": [{"message": {"role": "assistant", "content": "  A uniform gray square.\n"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 300, "completion_tokens": 6, "total_tokens": 306}
        }"#;
        let extracted = extract_analysis(body).unwrap();
        assert_eq!(extracted.content, "A uniform gray square.");
        assert_eq!(extracted.model.as_deref(), Some("grok-4-1-fast-non-reasoning"));
        assert_eq!(extracted.finish_reason.as_deref(), Some("stop"));
        assert_eq!(extracted.usage.unwrap().total_tokens, 306);
    }

    #[test]
    fn test_uses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_analysis(body).unwrap().content, "first");
    }

    #[test]
    fn test_empty_choices() {
        assert!(format_error(r#"{"choices":[]}"#).contains("no choices"));
        assert!(format_error(r#"{"id":"x"}"#).contains("no choices"));
    }

    #[test]
    fn test_missing_or_blank_content() {
        for body in [
            r#"{"choices":[{}]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":[{"message":{"content":"  \n\t"}}]}"#,
        ] {
            assert!(format_error(body).contains("content is empty"), "{body}");
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(format_error("<html>bad gateway</html>").contains("failed to parse"));
        assert!(format_error(r#"{"choices":"nope"}"#).contains("failed to parse"));
    }
}
