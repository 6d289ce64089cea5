//! Advisor Operations
//!
//! The two session operations. Both send the same system instruction; only
//! the user message differs (full payload dump vs. the follow-up question).
//! Generation is never spent on a failed fetch.

use std::sync::Arc;

use crate::ADVISOR_SYSTEM_PROMPT;
use crate::error::{AdvisorError, Result};
use crate::narration::NarrationClient;
use crate::risk::classify;
use crate::session::AdvisorySession;
use crate::source::PortfolioDataSource;

/// Runs advisory operations against a session with injected collaborators
#[derive(Clone)]
pub struct Advisor {
    source: Arc<dyn PortfolioDataSource>,
    narrator: Arc<dyn NarrationClient>,
}

impl Advisor {
    pub fn new(source: Arc<dyn PortfolioDataSource>, narrator: Arc<dyn NarrationClient>) -> Self {
        Self { source, narrator }
    }

    /// Name of the configured data source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the portfolio for `risk_level` and narrate it.
    ///
    /// Always re-fetches and re-generates. Overwrites tier, payload and
    /// advice; returns the new advice text. A failed fetch becomes the advice
    /// verbatim, a failed generation becomes a prefixed error message.
    pub async fn produce_initial_advice(
        &self,
        session: &mut AdvisorySession,
        risk_level: i32,
    ) -> String {
        let tier = classify(risk_level);
        tracing::info!(session = %session.id(), risk_level, %tier, "producing initial advice");

        let payload = self.source.fetch(risk_level).await;

        let advice = match payload.failure_message() {
            Some(message) => {
                tracing::warn!(session = %session.id(), "skipping narration: {}", message);
                message.to_string()
            }
            None => self.narrate(&payload.to_user_message()).await,
        };

        session.record_initial(risk_level, tier, payload, advice.clone());
        advice
    }

    /// Answer a free-text follow-up without re-fetching the payload.
    ///
    /// Empty queries and sessions without advice are rejected before any
    /// collaborator is called and leave the session untouched. Any other
    /// query, blanks included, is sent verbatim. Replaces advice only.
    pub async fn answer_follow_up(
        &self,
        session: &mut AdvisorySession,
        query: &str,
    ) -> Result<String> {
        if query.is_empty() {
            return Err(AdvisorError::EmptyQuery);
        }

        let payload = session.payload().ok_or(AdvisorError::NotAdvised)?;

        let advice = match payload.failure_message() {
            Some(message) => {
                tracing::warn!(session = %session.id(), "follow-up on failed fetch: {}", message);
                message.to_string()
            }
            None => {
                tracing::info!(session = %session.id(), "answering follow-up");
                self.narrate(query).await
            }
        };

        session.record_follow_up(advice.clone());
        Ok(advice)
    }

    /// Generated text, or the generation error as user-facing text
    async fn narrate(&self, user: &str) -> String {
        let err = match self.narrator.generate(ADVISOR_SYSTEM_PROMPT, user).await {
            Ok(text) => return text,
            Err(e @ AdvisorError::Generation(_)) => e,
            Err(other) => AdvisorError::Generation(other.to_string()),
        };

        tracing::warn!("narration failed: {}", err);
        err.to_string()
    }
}
