//! Portfolio Payload
//!
//! The outcome of one portfolio fetch. Success carries the data source's
//! response verbatim; the advisor never reshapes or validates it.

use serde::Serialize;

use crate::error::AdvisorError;

/// Either the decoded response or a failure message, never both
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PortfolioPayload {
    /// Failure record; renders as `{"error": "..."}`
    Failure { error: String },

    /// Opaque structured response
    Success(serde_json::Value),
}

impl PortfolioPayload {
    pub const fn success(data: serde_json::Value) -> Self {
        Self::Success(data)
    }

    /// Failure with a verbatim, already user-facing message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }

    pub const fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Compact JSON used as the narration user message
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Success(data) => data.to_string(),
            Self::Failure { error } => error.clone(),
        }
    }
}

impl From<AdvisorError> for PortfolioPayload {
    fn from(err: AdvisorError) -> Self {
        Self::failure(err.to_string())
    }
}
