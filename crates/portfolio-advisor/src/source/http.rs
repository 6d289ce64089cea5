//! HTTP Portfolio Source
//!
//! One GET per fetch, parameterized by the risk level query parameter.

use std::time::Duration;

use async_trait::async_trait;

use super::PortfolioDataSource;
use crate::error::{AdvisorError, Result};
use crate::payload::PortfolioPayload;

/// Portfolio API configuration
#[derive(Clone, Debug)]
pub struct PortfolioSourceConfig {
    /// Endpoint URL
    pub url: String,

    /// Name of the risk level query parameter
    pub risk_param: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PortfolioSourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            risk_param: "risk_level".into(),
            timeout_secs: 30,
        }
    }

    /// Read `PORTFOLIO_API_URL`, `PORTFOLIO_RISK_PARAM` and
    /// `PORTFOLIO_TIMEOUT_SECS`. `None` when no URL is configured.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = lookup("PORTFOLIO_API_URL").filter(|u| !u.trim().is_empty())?;
        let mut config = Self::new(url.trim());

        if let Some(param) = lookup("PORTFOLIO_RISK_PARAM").filter(|p| !p.trim().is_empty()) {
            config.risk_param = param.trim().to_string();
        }
        if let Some(secs) = lookup("PORTFOLIO_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout_secs = secs;
        }

        Some(config)
    }
}

/// Portfolio source backed by a remote JSON API
pub struct HttpPortfolioSource {
    http: reqwest::Client,
    config: PortfolioSourceConfig,
}

impl HttpPortfolioSource {
    pub fn new(config: PortfolioSourceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    async fn try_fetch(&self, risk_level: i32) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(&self.config.url)
            .query(&[(self.config.risk_param.as_str(), risk_level)])
            .send()
            .await
            .map_err(|e| AdvisorError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Fetch(format!("HTTP {}", status.as_u16())));
        }

        response
            .json()
            .await
            .map_err(|e| AdvisorError::Fetch(format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl PortfolioDataSource for HttpPortfolioSource {
    async fn fetch(&self, risk_level: i32) -> PortfolioPayload {
        tracing::debug!(url = %self.config.url, risk_level, "fetching portfolio");

        match self.try_fetch(risk_level).await {
            Ok(data) => PortfolioPayload::success(data),
            Err(e) => {
                tracing::warn!(risk_level, "portfolio fetch failed: {}", e);
                e.into()
            }
        }
    }

    fn name(&self) -> &str {
        "HttpPortfolioSource"
    }
}
