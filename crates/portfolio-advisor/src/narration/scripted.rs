//! Scripted Narration
//!
//! For testing and offline demos. Replies come from a queue; every request
//! is recorded so callers can assert on what was sent.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::NarrationClient;
use crate::error::{AdvisorError, Result};

/// One recorded generation request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrationCall {
    pub system: String,
    pub user: String,
}

/// Narration client with queued replies
#[derive(Default)]
pub struct ScriptedNarrator {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<NarrationCall>>,
}

impl ScriptedNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn with_reply(mut self, text: impl Into<String>) -> Self {
        self.replies.get_mut().push_back(Ok(text.into()));
        self
    }

    /// Queue a generation failure
    pub fn with_failure(mut self, cause: impl Into<String>) -> Self {
        self.replies
            .get_mut()
            .push_back(Err(AdvisorError::Generation(cause.into())));
        self
    }

    /// All requests received, oldest first
    pub async fn calls(&self) -> Vec<NarrationCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl NarrationClient for ScriptedNarrator {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.calls.lock().await.push(NarrationCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        // An exhausted script echoes the request so demos still show something.
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(format!("(scripted) {user}")))
    }
}
