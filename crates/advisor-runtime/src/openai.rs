//! OpenAI-compatible LLM Provider
//!
//! Implementation of `LlmProvider` for any endpoint that speaks the OpenAI
//! chat completions protocol (OpenAI itself, Azure-style gateways, vLLM,
//! Ollama's `/v1`, ...).

use std::time::Duration;

use advisor_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Bearer token
    pub api_key: String,

    /// API base URL, without trailing slash
    pub api_base: String,

    /// Model used when the caller's options leave it unset
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.into(),
            model: GenerationOptions::default().model,
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    /// Read `OPENAI_API_KEY`, `OPENAI_API_BASE`, `OPENAI_MODEL` and
    /// `OPENAI_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AgentError::Config("OPENAI_API_KEY is not set".into()))?;

        let defaults = Self::default();
        let api_base = lookup("OPENAI_API_BASE")
            .filter(|b| !b.trim().is_empty())
            .map_or(defaults.api_base, |b| b.trim().trim_end_matches('/').to_string());
        let model = lookup("OPENAI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.model);
        let timeout_secs = lookup("OPENAI_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Ok(Self {
            api_key,
            api_base,
            model,
            timeout_secs,
        })
    }
}

/// OpenAI-compatible LLM provider
pub struct OpenAiProvider {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiConfig::from_env()?)
    }

    /// Model used when options don't name one
    pub fn default_model(&self) -> &str {
        &self.config.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_base)
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [Message],
        options: &'a GenerationOptions,
    ) -> ChatRequest<'a> {
        let model = if options.model.is_empty() {
            self.config.model.as_str()
        } else {
            options.model.as_str()
        };

        ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            stop: (!options.stop_sequences.is_empty()).then_some(options.stop_sequences.as_slice()),
        }
    }

    /// Convert an OpenAI response to a completion
    fn convert_completion(response: ChatResponse) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Parse("no choices in completion response".into()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| AgentError::Parse("no content in completion response".into()))?;

        Ok(Completion {
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.as_deref().map(FinishReason::parse),
        })
    }

    /// GET `/models`; succeeds when the key is accepted
    async fn check_models(&self) -> Result<()> {
        let response = self
            .http
            .get(self.url("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, &body))
        }
    }
}

/// Map a non-success HTTP status to the matching error
fn status_error(status: StatusCode, body: &str) -> AgentError {
    let detail = error_detail(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(detail),
        _ => AgentError::Provider(format!("HTTP {}: {detail}", status.as_u16())),
    }
}

/// Pull `error.message` out of an OpenAI error body, or fall back to the raw text
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn health_check(&self) -> Result<bool> {
        match self.check_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = self.build_request(messages, options);
        tracing::debug!(model = request.model, messages = messages.len(), "chat completion");

        let response = self
            .http
            .post(self.url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        Self::convert_completion(body)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::from_config(OpenAiConfig {
            api_key: "sk-test".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_config_requires_key() {
        let err = OpenAiConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));

        let err = OpenAiConfig::from_lookup(|k| (k == "OPENAI_API_KEY").then(|| "  ".into()))
            .unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = OpenAiConfig::from_lookup(|k| match k {
            "OPENAI_API_KEY" => Some("sk-abc".into()),
            "OPENAI_API_BASE" => Some("http://localhost:8080/v1/".into()),
            "OPENAI_TIMEOUT_SECS" => Some("5".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_key, "sk-abc");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_request_body() {
        let provider = provider();
        let messages = vec![Message::system("You are an advisor."), Message::user("Hi")];
        let options = GenerationOptions::default();

        let body = serde_json::to_value(provider.build_request(&messages, &options)).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are an advisor.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 510);
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["frequency_penalty"], 0.0);
        assert_eq!(body["presence_penalty"], 0.0);
        assert!(body.get("stop").is_none());
    }

    #[test]
    fn test_request_falls_back_to_configured_model() {
        let provider = provider();
        let options = GenerationOptions::default().with_model("");
        let request = provider.build_request(&[], &options);
        assert_eq!(request.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_convert_completion() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "model": "gpt-3.5-turbo-0125",
                "choices": [{"message": {"role": "assistant", "content": "Stay diversified."}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
            }"#,
        )
        .unwrap();

        let completion = OpenAiProvider::convert_completion(response).unwrap();
        assert_eq!(completion.content, "Stay diversified.");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 13);
    }

    #[test]
    fn test_convert_completion_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = OpenAiProvider::convert_completion(response).unwrap_err();
        assert!(matches!(err, AgentError::Parse(_)));
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"message": "Incorrect API key provided"}}"#;
        let err = status_error(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, AgentError::Auth(ref m) if m == "Incorrect API key provided"));

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "quota exceeded");
        assert!(matches!(err, AgentError::RateLimited(_)));

        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "Provider error: HTTP 502: upstream down");
    }
}
