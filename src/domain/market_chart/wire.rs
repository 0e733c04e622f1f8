//! Wire types for `GET /coins/{id}/market_chart`.

use serde::{Deserialize, Serialize};

/// One `[epoch_ms, value]` pair as sent by the API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPricePair(pub f64, pub f64);

impl RawPricePair {
    pub fn epoch_ms(&self) -> f64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

/// REST response for a market chart. Only `prices` is charted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<RawPricePair>,
    #[serde(default)]
    pub market_caps: Vec<RawPricePair>,
    #[serde(default)]
    pub total_volumes: Vec<RawPricePair>,
}
