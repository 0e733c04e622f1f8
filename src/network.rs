//! Network constants for the CoinGecko public API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko coin id charted by default.
pub const DEFAULT_ASSET: &str = "tether";

/// Default request timeout in seconds (native only).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
