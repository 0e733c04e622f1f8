//! Conversions from wire pairs to validated price points.

use super::wire::{MarketChartResponse, RawPricePair};
use super::PricePoint;
use crate::error::FetchError;
use chrono::DateTime;
use rust_decimal::Decimal;

impl TryFrom<RawPricePair> for PricePoint {
    type Error = FetchError;

    fn try_from(pair: RawPricePair) -> Result<Self, Self::Error> {
        let ms = pair.epoch_ms();
        if !ms.is_finite() {
            return Err(FetchError::Malformed(format!("non-finite timestamp {ms}")));
        }
        let timestamp = DateTime::from_timestamp_millis(ms.floor() as i64)
            .ok_or_else(|| FetchError::Malformed(format!("timestamp out of range: {ms}")))?;

        let price = Decimal::try_from(pair.value())
            .map_err(|e| FetchError::Malformed(format!("price {}: {e}", pair.value())))?;

        Ok(Self { timestamp, price })
    }
}

/// Convert every `prices` pair, keeping response order.
///
/// One bad pair rejects the whole response; a chart never shows a partial series.
pub fn price_points(resp: MarketChartResponse) -> Result<Vec<PricePoint>, FetchError> {
    resp.prices.into_iter().map(PricePoint::try_from).collect()
}
