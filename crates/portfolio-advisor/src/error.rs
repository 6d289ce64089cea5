//! Error Types for the Portfolio Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Portfolio data source unreachable or answered with a non-success status
    #[error("Failed to fetch data: {0}")]
    Fetch(String),

    /// Narration call failed (auth, quota, network, malformed response)
    #[error("Error generating advice: {0}")]
    Generation(String),

    /// Follow-up submitted without any question text
    #[error("Please enter a question before submitting.")]
    EmptyQuery,

    /// Follow-up submitted before any initial advice exists
    #[error("No advice yet: request initial advice before asking a follow-up question.")]
    NotAdvised,

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_prefixed() {
        assert_eq!(
            AdvisorError::Fetch("timeout".into()).to_string(),
            "Failed to fetch data: timeout"
        );
        assert_eq!(
            AdvisorError::Generation("quota exceeded".into()).to_string(),
            "Error generating advice: quota exceeded"
        );
    }
}
