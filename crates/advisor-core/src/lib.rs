//! # advisor-core
//!
//! Provider-agnostic chat completion abstraction used by the portfolio advisor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     portfolio-advisor                     │
//! │  ┌──────────────┐   ┌─────────────┐   ┌───────────────┐  │
//! │  │   Advisory   │──▶│  Narration  │──▶│  LlmProvider  │  │
//! │  │   Session    │   │   Client    │   │  (Strategy)   │  │
//! │  └──────────────┘   └─────────────┘   └───────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the advisor swap between OpenAI-compatible
//! endpoints (hosted or local) and test doubles without touching the session
//! logic.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
