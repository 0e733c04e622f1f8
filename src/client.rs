//! High-level client — `ChartClient` with its sub-client accessor.
//!
//! The market chart sub-client lives in `domain/market_chart/client.rs`.
//! This module keeps the builder and the shared HTTP handle.

use crate::domain::market_chart::client::MarketChart;
use crate::error::HttpError;
use crate::http::{CoinGeckoHttp, RetryPolicy};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::market_chart::client::MarketChart as MarketChartSubClient;

/// The primary entry point for the SDK.
#[derive(Debug, Clone)]
pub struct ChartClient {
    pub(crate) http: CoinGeckoHttp,
    /// CoinGecko coin id, `tether` unless overridden.
    pub(crate) asset: String,
}

impl ChartClient {
    pub fn builder() -> ChartClientBuilder {
        ChartClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn market_chart(&self) -> MarketChart<'_> {
        MarketChart { client: self }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ChartClientBuilder {
    base_url: String,
    asset: String,
    timeout: Option<Duration>,
    retry_policy: RetryPolicy,
}

impl Default for ChartClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            asset: crate::network::DEFAULT_ASSET.to_string(),
            timeout: Some(Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS)),
            retry_policy: RetryPolicy::None,
        }
    }
}

impl ChartClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn asset(mut self, asset: &str) -> Self {
        self.asset = asset.to_string();
        self
    }

    /// Per-request timeout. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<ChartClient, HttpError> {
        Ok(ChartClient {
            http: CoinGeckoHttp::new(&self.base_url, self.timeout, self.retry_policy)?,
            asset: self.asset,
        })
    }
}
