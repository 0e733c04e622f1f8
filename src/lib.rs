//! # GSDT Chart SDK
//!
//! Fetches tether ("GSDT") price history from the CoinGecko `market_chart`
//! endpoint, samples it down to one opening price per hour or day, and maps
//! the selected currency and time range to a line chart configuration.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, bucketing (always available, WASM-safe)
//! 2. **HTTP API** — `CoinGeckoHttp` with configurable retry policies
//! 3. **High-Level Client** — `ChartClient` with the market chart sub-client
//! 4. **Controller** — `ChartController`, the UI-state owner that sequences fetch cycles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gsdt_chart::prelude::*;
//!
//! let client = ChartClient::builder().build()?;
//! let controller = ChartController::new(client);
//!
//! controller.refresh().await;
//! controller.toggle_currency().await;
//!
//! let chart = controller.chart(&LineChartPresenter).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `ChartClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{BucketKey, Currency, Granularity, GranularityPolicy, TimeRange};

    // Domain types — market chart
    pub use crate::domain::market_chart::{bucket, ChartQuery, PricePoint, Series};

    // Domain types — chart presentation
    pub use crate::domain::chart::{
        AxisKind, ChartConfig, ChartPoint, ChartPresenter, LineChartPresenter,
    };

    // Domain types — UI state
    pub use crate::domain::dashboard::{CycleOutcome, UiState};

    // Errors
    pub use crate::error::{FetchError, HttpError, ParseError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_ASSET};

    // HTTP client + sub-clients + controller
    #[cfg(feature = "http")]
    pub use crate::client::{ChartClient, ChartClientBuilder, MarketChartSubClient};
    #[cfg(feature = "http")]
    pub use crate::domain::dashboard::controller::{ChartController, MarketChartSource};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
