//! Portfolio Data Sources
//!
//! Abstractions and implementations for the external portfolio API.

mod http;
mod mock;

pub use http::{HttpPortfolioSource, PortfolioSourceConfig};
pub use mock::MockPortfolioSource;

use async_trait::async_trait;

use crate::payload::PortfolioPayload;

/// Portfolio data source trait (Strategy pattern)
///
/// Implementations never fail past this boundary: transport errors,
/// non-success statuses and undecodable bodies all come back as
/// [`PortfolioPayload::Failure`].
#[async_trait]
pub trait PortfolioDataSource: Send + Sync {
    /// Fetch the portfolio for a risk level
    async fn fetch(&self, risk_level: i32) -> PortfolioPayload;

    /// Source name, for logs and health output
    fn name(&self) -> &str;
}
