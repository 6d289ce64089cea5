//! Mock Portfolio Source
//!
//! For testing and demo purposes. Returns a static model portfolio per tier.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use super::PortfolioDataSource;
use crate::payload::PortfolioPayload;
use crate::risk::{RiskTier, classify};

/// Mock source with static portfolios
#[derive(Default)]
pub struct MockPortfolioSource {
    /// Returned instead of the static portfolio when set
    forced: Option<PortfolioPayload>,

    fetches: AtomicUsize,
    levels: Mutex<Vec<i32>>,
}

impl MockPortfolioSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with this payload
    pub fn returning(payload: PortfolioPayload) -> Self {
        Self {
            forced: Some(payload),
            ..Self::default()
        }
    }

    /// Always answer with a failure payload carrying this message
    pub fn failing(message: impl Into<String>) -> Self {
        Self::returning(PortfolioPayload::failure(message))
    }

    /// Number of fetches served
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Risk levels requested, oldest first
    pub async fn requested_levels(&self) -> Vec<i32> {
        self.levels.lock().await.clone()
    }

    /// Model portfolio for a level
    fn model_portfolio(risk_level: i32) -> serde_json::Value {
        let tier = classify(risk_level);
        // (stocks, bonds, cash, expected return %, volatility)
        let (stocks, bonds, cash, expected_return, volatility) = match tier {
            RiskTier::Conservative => (25, 60, 15, 4.0, "low"),
            RiskTier::Moderate => (55, 35, 10, 6.5, "medium"),
            RiskTier::Aggressive => (80, 15, 5, 9.0, "high"),
            RiskTier::Unknown => (0, 0, 100, 0.0, "none"),
        };

        json!({
            "risk_level": risk_level,
            "profile": tier.as_str(),
            "allocation": {
                "stocks": stocks,
                "bonds": bonds,
                "cash": cash,
            },
            "expected_annual_return_pct": expected_return,
            "volatility": volatility,
        })
    }
}

#[async_trait]
impl PortfolioDataSource for MockPortfolioSource {
    async fn fetch(&self, risk_level: i32) -> PortfolioPayload {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.levels.lock().await.push(risk_level);

        self.forced.clone().unwrap_or_else(|| {
            PortfolioPayload::success(Self::model_portfolio(risk_level))
        })
    }

    fn name(&self) -> &str {
        "MockPortfolioSource"
    }
}
