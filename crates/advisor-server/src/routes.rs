//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    classify_risk, create_session, delete_session, follow_up, get_session, health_check,
    request_advice,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/risk-tiers/{level}", get(classify_risk))
        // Sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/advice", post(request_advice))
        .route("/api/sessions/{id}/follow-up", post(follow_up))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
