//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portfolio_advisor::{
    AdvisorError, AdvisorySession, PortfolioPayload, RiskTier, SessionId, SessionState, classify,
};

use crate::state::{AppState, SessionHandle};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_connected: bool,
    pub data_source: String,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TierResponse {
    pub risk_level: i32,
    pub tier: RiskTier,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub risk_level: i32,
}

#[derive(Debug, Deserialize)]
pub struct FollowUpRequest {
    #[serde(default)]
    pub query: String,
}

/// What the client sees of a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub state: SessionState,
    pub risk_level: Option<i32>,
    pub tier: Option<RiskTier>,
    pub payload: Option<PortfolioPayload>,
    pub advice: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AdvisorySession> for SessionView {
    fn from(session: &AdvisorySession) -> Self {
        Self {
            session_id: session.id().to_string(),
            state: session.state(),
            risk_level: session.risk_level(),
            tier: session.tier(),
            payload: session.payload().cloned(),
            advice: session.advice().map(str::to_string),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

async fn find_session(state: &AppState, id: &str) -> Result<SessionHandle, ApiError> {
    state
        .sessions
        .get(&SessionId::from_string(id))
        .await
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                format!("Session {id} not found"),
            )
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm_connected,
        data_source: state.advisor.source_name().to_string(),
        active_sessions: state.sessions.len().await,
    })
}

/// Classify a risk level
pub async fn classify_risk(Path(level): Path<i32>) -> Json<TierResponse> {
    let tier = classify(level);
    Json(TierResponse {
        risk_level: level,
        tier,
        description: tier.description().into(),
    })
}

/// Start a new session
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let handle = state.sessions.create().await;
    let session = handle.lock().await;
    tracing::info!(session = %session.id(), "session started");

    (StatusCode::CREATED, Json(SessionView::from(&*session)))
}

/// Inspect a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = find_session(&state, &id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionView::from(&*session)))
}

/// End a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&SessionId::from_string(&id)).await {
        tracing::info!(session = %id, "session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            "SESSION_NOT_FOUND",
            format!("Session {id} not found"),
        ))
    }
}

/// Fetch and narrate the portfolio for a risk level
pub async fn request_advice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AdviceRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = find_session(&state, &id).await?;
    let mut session = handle.lock().await;

    state
        .advisor
        .produce_initial_advice(&mut session, payload.risk_level)
        .await;

    Ok(Json(SessionView::from(&*session)))
}

/// Answer a follow-up question
pub async fn follow_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FollowUpRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = find_session(&state, &id).await?;
    let mut session = handle.lock().await;

    match state.advisor.answer_follow_up(&mut session, &payload.query).await {
        Ok(_) => Ok(Json(SessionView::from(&*session))),
        Err(e) => {
            tracing::info!(session = %id, "follow-up rejected: {}", e);
            Err(follow_up_rejection(&e))
        }
    }
}

/// HTTP form of a rejected follow-up
fn follow_up_rejection(error: &AdvisorError) -> ApiError {
    let (status, code) = match error {
        AdvisorError::EmptyQuery => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_QUERY"),
        AdvisorError::NotAdvised => (StatusCode::CONFLICT, "NOT_ADVISED"),
        // fetch and generation failures arrive as advice text, never as errors
        AdvisorError::Fetch(_) | AdvisorError::Generation(_) | AdvisorError::Config(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "ADVISOR_ERROR")
        }
    };

    api_error(status, code, error.to_string())
}
