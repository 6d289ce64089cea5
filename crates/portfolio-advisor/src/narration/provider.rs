//! Provider-backed Narration
//!
//! Adapts any `LlmProvider` to the narration boundary with the advisor's
//! fixed generation parameters.

use std::sync::Arc;

use advisor_core::{GenerationOptions, LlmProvider, Message};
use async_trait::async_trait;

use super::NarrationClient;
use crate::error::{AdvisorError, Result};

/// Narration client over a chat completion provider
pub struct ProviderNarrator {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl ProviderNarrator {
    /// Narrate with the default generation options
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_options(provider, GenerationOptions::default())
    }

    pub fn with_options(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }
}

#[async_trait]
impl NarrationClient for ProviderNarrator {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let messages = [Message::system(system), Message::user(user)];

        tracing::debug!(model = %self.options.model, user_len = user.len(), "requesting narration");

        let completion = self
            .provider
            .complete(&messages, &self.options)
            .await
            .map_err(|e| AdvisorError::Generation(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "narration complete"
            );
        }

        Ok(completion.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{AgentError, Completion, Role};
    use tokio::sync::Mutex;

    /// Provider that records requests and replies from a fixed outcome
    struct StubProvider {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<(Vec<Message>, GenerationOptions)>>,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn health_check(&self) -> advisor_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> advisor_core::Result<Completion> {
            self.seen.lock().await.push((messages.to_vec(), options.clone()));
            match &self.reply {
                Ok(content) => Ok(Completion {
                    content: content.clone(),
                    model: options.model.clone(),
                    usage: None,
                    finish_reason: None,
                }),
                Err(msg) => Err(AgentError::RateLimited(msg.clone())),
            }
        }
    }

    #[tokio::test]
    async fn test_sends_system_and_user_messages() {
        let provider = Arc::new(StubProvider {
            reply: Ok("Keep a balanced mix.".into()),
            seen: Mutex::new(Vec::new()),
        });
        let narrator = ProviderNarrator::new(provider.clone());

        let text = narrator.generate("You are an advisor.", "{\"stocks\":80}").await.unwrap();
        assert_eq!(text, "Keep a balanced mix.");

        let seen = provider.seen.lock().await;
        let (messages, options) = &seen[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "You are an advisor.");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "{\"stocks\":80}");
        assert_eq!(options.max_tokens, 510);
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_generation_error() {
        let provider = Arc::new(StubProvider {
            reply: Err("quota exceeded".into()),
            seen: Mutex::new(Vec::new()),
        });
        let narrator = ProviderNarrator::new(provider);

        let err = narrator.generate("system", "user").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error generating advice: Rate limited: quota exceeded"
        );
    }
}
