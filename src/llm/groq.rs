//! Groq chat-completions client
//!
//! Blocking client for Groq's OpenAI-compatible API. Call it from a blocking
//! thread; the MCP server wraps calls in `spawn_blocking`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GenerationError, GenerationRequest, TextGenerator};

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_body<'a>(model: &'a str, request: &'a GenerationRequest) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage { role: "system", content: &request.system },
            ChatMessage { role: "user", content: &request.prompt },
        ],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

/// Extract the first choice's text from a success body
fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

/// Best-effort message from an error body
fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().chars().take(500).collect())
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct GroqClient {
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GroqClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl TextGenerator for GroqClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        // Built per call: a blocking client must not be created or dropped
        // on an async runtime thread
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        debug!(model = %self.model, prompt_len = request.prompt.len(), "Sending chat completion");

        let response = client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&build_body(&self.model, request))
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = parse_error_message(&body);
            warn!(status = status.as_u16(), %message, "Chat completion failed");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_completion(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerationRequest::new("be helpful", "plan my week");
        let body = serde_json::to_value(build_body(DEFAULT_MODEL, &request)).unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "plan my week");
        assert_eq!(body["max_tokens"], 1200);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_completion() {
        let body = r###"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"## Day 1"},"finish_reason":"stop"}],"model":"m"}"###;
        assert_eq!(parse_completion(body).unwrap(), "## Day 1");
    }

    #[test]
    fn test_parse_completion_empty() {
        assert!(matches!(parse_completion(r#"{"choices":[]}"#), Err(GenerationError::EmptyResponse)));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(GenerationError::EmptyResponse)
        ));
        assert!(matches!(parse_completion("not json"), Err(GenerationError::Decode(_))));
    }

    #[test]
    fn test_parse_error_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(parse_error_message(body), "Invalid API Key");
        assert_eq!(parse_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_missing_key_fails_without_network() {
        let client = GroqClient::new(Some("   ".to_string()), DEFAULT_MODEL, DEFAULT_API_BASE);
        assert!(!client.is_configured());
        let err = client.generate(&GenerationRequest::new("s", "p")).unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let client = GroqClient::new(None, DEFAULT_MODEL, "http://localhost:8080/v1/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
