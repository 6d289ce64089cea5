//! # advisor-runtime
//!
//! Chat completion providers for the portfolio advisor.
//!
//! ## Providers
//!
//! - **OpenAI** (default): any OpenAI-compatible `/chat/completions` endpoint.
//!   Local models work through the same provider by pointing
//!   `OPENAI_API_BASE` at e.g. `http://localhost:11434/v1` (Ollama).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::OpenAiProvider;
//!
//! let provider = Arc::new(OpenAiProvider::from_env()?);
//! let narrator = ProviderNarrator::new(provider);
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use advisor_core::{AgentError, GenerationOptions, LlmProvider, Message, Result, Role};
