//! portfolio-advisor HTTP Server
//!
//! Axum-based server exposing advisory sessions: pick a risk level, get the
//! matching portfolio narrated, then ask follow-up questions.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::{GenerationOptions, LlmProvider};
use advisor_runtime::OpenAiProvider;
use portfolio_advisor::{
    Advisor, HttpPortfolioSource, MockPortfolioSource, PortfolioDataSource, PortfolioSourceConfig,
    ProviderNarrator,
};

use crate::config::ServerConfig;
use crate::state::{AppState, SessionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize LLM provider
    let openai = OpenAiProvider::from_env().context("configuring OpenAI provider")?;
    let options = GenerationOptions::default().with_model(openai.default_model());
    let provider: Arc<dyn LlmProvider> = Arc::new(openai);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ LLM provider reachable (model {})", options.model),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ LLM provider not reachable - advice will show generation errors");
        }
    }

    // Initialize portfolio data source
    let source: Arc<dyn PortfolioDataSource> = match PortfolioSourceConfig::from_env() {
        Some(source_config) => {
            tracing::info!("✓ Portfolio API: {}", source_config.url);
            Arc::new(HttpPortfolioSource::new(source_config)?)
        }
        None => {
            tracing::warn!("⚠ PORTFOLIO_API_URL not set - using mock portfolios");
            Arc::new(MockPortfolioSource::new())
        }
    };

    let narrator = Arc::new(ProviderNarrator::with_options(provider.clone(), options));

    // Build application state
    let sessions = Arc::new(SessionRegistry::with_ttl(config.session_ttl));
    let _sweeper = sessions.spawn_sweeper(config.sweep_interval);
    tracing::info!(
        "✓ Sessions end after {}s idle (swept every {}s)",
        config.session_ttl.as_secs(),
        config.sweep_interval.as_secs()
    );

    let state = AppState {
        provider,
        advisor: Advisor::new(source, narrator),
        sessions,
    };

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portfolio-advisor running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health                       - Health check");
    tracing::info!("  GET    /api/risk-tiers/{{level}}       - Classify a risk level");
    tracing::info!("  POST   /api/sessions                 - Start a session");
    tracing::info!("  GET    /api/sessions/{{id}}            - Inspect a session");
    tracing::info!("  DELETE /api/sessions/{{id}}            - End a session");
    tracing::info!("  POST   /api/sessions/{{id}}/advice     - Initial advice for a risk level");
    tracing::info!("  POST   /api/sessions/{{id}}/follow-up  - Ask a follow-up question");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
