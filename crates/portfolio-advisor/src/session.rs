//! Advisory Session
//!
//! Per-user state for one interactive session: the latest tier, the latest
//! fetched payload and the advice text currently on display. Owned by the
//! caller and handed to [`Advisor`](crate::Advisor) by mutable reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payload::PortfolioPayload;
use crate::risk::RiskTier;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No payload fetched yet
    Empty,
    /// Payload (possibly a failure) and advice present
    Advised,
}

/// State of one advisory session
#[derive(Clone, Debug, Serialize)]
pub struct AdvisorySession {
    id: SessionId,
    risk_level: Option<i32>,
    tier: Option<RiskTier>,
    payload: Option<PortfolioPayload>,
    advice: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdvisorySession {
    /// Start an empty session
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            risk_level: None,
            tier: None,
            payload: None,
            advice: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    pub const fn state(&self) -> SessionState {
        if self.payload.is_some() {
            SessionState::Advised
        } else {
            SessionState::Empty
        }
    }

    pub const fn risk_level(&self) -> Option<i32> {
        self.risk_level
    }

    pub const fn tier(&self) -> Option<RiskTier> {
        self.tier
    }

    pub const fn payload(&self) -> Option<&PortfolioPayload> {
        self.payload.as_ref()
    }

    pub fn advice(&self) -> Option<&str> {
        self.advice.as_deref()
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite tier, payload and advice after a fetch
    pub(crate) fn record_initial(
        &mut self,
        risk_level: i32,
        tier: RiskTier,
        payload: PortfolioPayload,
        advice: String,
    ) {
        self.risk_level = Some(risk_level);
        self.tier = Some(tier);
        self.payload = Some(payload);
        self.advice = Some(advice);
        self.touch();
    }

    /// Replace advice only; tier and payload stay as they are
    pub(crate) fn record_follow_up(&mut self, advice: String) {
        self.advice = Some(advice);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for AdvisorySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_session_is_empty() {
        let session = AdvisorySession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.tier().is_none());
        assert!(session.payload().is_none());
        assert!(session.advice().is_none());
    }

    #[test]
    fn test_follow_up_leaves_tier_and_payload() {
        let mut session = AdvisorySession::new();
        let payload = PortfolioPayload::success(json!({"stocks": 80}));
        session.record_initial(7, RiskTier::Aggressive, payload.clone(), "first".into());
        session.record_follow_up("second".into());

        assert_eq!(session.state(), SessionState::Advised);
        assert_eq!(session.tier(), Some(RiskTier::Aggressive));
        assert_eq!(session.payload(), Some(&payload));
        assert_eq!(session.advice(), Some("second"));
        assert!(session.updated_at() >= session.created_at());
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(AdvisorySession::new().id(), AdvisorySession::new().id());
        let id = SessionId::from_string("abc");
        assert_eq!(AdvisorySession::with_id(id.clone()).id(), &id);
    }
}
