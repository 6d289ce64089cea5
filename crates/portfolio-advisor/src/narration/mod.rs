//! Narration
//!
//! Text generation boundary: one system instruction plus one user message in,
//! generated text or an [`AdvisorError::Generation`](crate::AdvisorError::Generation) out.

mod provider;
mod scripted;

pub use provider::ProviderNarrator;
pub use scripted::{NarrationCall, ScriptedNarrator};

use async_trait::async_trait;

use crate::error::Result;

/// Narration client trait (Strategy pattern)
#[async_trait]
pub trait NarrationClient: Send + Sync {
    /// Generate text for a system instruction and a single user message
    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}
