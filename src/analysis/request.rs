//! Chat completion payload construction.

use crate::analysis::types::AnalysisOptions;
use serde::Serialize;

/// A fully assembled analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Model identifier, unvalidated.
    pub model: String,
    /// System instructions, if any.
    pub system_prompt: Option<String>,
    /// The question asked about the image.
    pub user_prompt: String,
    /// `data:image/<fmt>;base64,<payload>` URI.
    pub image_data_uri: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Completion length limit.
    pub max_tokens: Option<u32>,
}

impl AnalysisRequest {
    /// Builds a request. A blank system prompt is dropped.
    pub fn build(
        model: impl Into<String>,
        system_prompt: Option<&str>,
        user_prompt: impl Into<String>,
        image_data_uri: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt
                .filter(|p| !p.trim().is_empty())
                .map(str::to_string),
            user_prompt: user_prompt.into(),
            image_data_uri: image_data_uri.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Builds a request from caller options.
    pub fn from_options(options: &AnalysisOptions, image_data_uri: impl Into<String>) -> Self {
        Self {
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            ..Self::build(
                options.model.clone(),
                options.system_prompt.as_deref(),
                options.user_prompt.clone(),
                image_data_uri,
            )
        }
    }

    /// Returns the JSON body sent to the chat completions endpoint.
    pub fn payload(&self) -> ChatCompletionRequest<'_> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: Role::System,
                content: MessageContent::Text(system),
            });
        }
        messages.push(ChatMessage {
            role: Role::User,
            content: MessageContent::Blocks(vec![
                ContentBlock::Text {
                    text: &self.user_prompt,
                },
                ContentBlock::ImageUrl {
                    image_url: ImageUrl {
                        url: &self.image_data_uri,
                    },
                },
            ]),
        });

        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Serialized chat completion body.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: MessageContent<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Blocks(Vec<ContentBlock<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URI: &str = "data:image/png;base64,AAAA";

    #[test]
    fn test_payload_with_system_prompt() {
        let req = AnalysisRequest::build(
            "grok-4-1-fast-non-reasoning",
            Some("Be precise."),
            "Describe this image.",
            URI,
        );
        let body = serde_json::to_value(req.payload()).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "grok-4-1-fast-non-reasoning",
                "messages": [
                    {"role": "system", "content": "Be precise."},
                    {"role": "user", "content": [
                        {"type": "text", "text": "Describe this image."},
                        {"type": "image_url", "image_url": {"url": URI}}
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_blank_system_prompt_is_omitted() {
        for system in [None, Some(""), Some("  \n")] {
            let req = AnalysisRequest::build("m", system, "q", URI);
            assert!(req.system_prompt.is_none());
            let body = serde_json::to_value(req.payload()).unwrap();
            let messages = body["messages"].as_array().unwrap();
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0]["role"], "user");
        }
    }

    #[test]
    fn test_model_passed_verbatim() {
        let req = AnalysisRequest::build("not-a-real-model", None, "q", URI);
        let body = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(body["model"], "not-a-real-model");
    }

    #[test]
    fn test_from_options_includes_sampling() {
        let options = AnalysisOptions::default();
        let req = AnalysisRequest::from_options(&options, URI);
        let body = serde_json::to_value(req.payload()).unwrap();

        assert_eq!(body["max_tokens"], 2048);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            URI
        );
    }
}
