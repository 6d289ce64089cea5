//! # portfolio-advisor
//!
//! Conversational investment advisory session. A risk level picks an advisory
//! tier, the matching portfolio is fetched from an external API, and a chat
//! model narrates it. Follow-up questions reuse the fetched portfolio.
//!
//! ## Flow
//!
//! ```text
//!  risk level ──▶ classify ──▶ PortfolioDataSource::fetch
//!                                      │
//!                     failure ◀────────┴────────▶ success
//!                        │                          │
//!              advice = message          NarrationClient::generate
//!              (no generation)           (system prompt, payload JSON)
//!                        │                          │
//!                        └──────▶ AdvisorySession ◀─┘
//!                                      │
//!                 follow-up ──▶ NarrationClient::generate
//!                               (system prompt, question)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! let advisor = Advisor::new(Arc::new(MockPortfolioSource::new()), narrator);
//! let mut session = AdvisorySession::new();
//!
//! let advice = advisor.produce_initial_advice(&mut session, 7).await;
//! let answer = advisor.answer_follow_up(&mut session, "What about bonds?").await?;
//! ```

pub mod advisor;
pub mod error;
pub mod narration;
pub mod payload;
pub mod risk;
pub mod session;
pub mod source;

pub use advisor::Advisor;
pub use error::{AdvisorError, Result};
pub use narration::{NarrationClient, ProviderNarrator, ScriptedNarrator};
pub use payload::PortfolioPayload;
pub use risk::{RiskTier, classify};
pub use session::{AdvisorySession, SessionId, SessionState};
pub use source::{HttpPortfolioSource, MockPortfolioSource, PortfolioDataSource, PortfolioSourceConfig};

/// System instruction sent with every generation call
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are an investment advisor. Analyse the data and provide holistic advice in short, simple words to a customer, based on the JSON data.";
