//! Market chart sub-client — price history fetch.

use super::{bucket, price_points, wire::MarketChartResponse, ChartQuery, PricePoint, Series};
use crate::client::ChartClient;
use crate::error::FetchError;
use crate::shared::Granularity;

/// Sub-client for market chart operations.
pub struct MarketChart<'a> {
    pub(crate) client: &'a ChartClient,
}

impl<'a> MarketChart<'a> {
    /// The response as sent, for callers that want caps or volumes too.
    pub async fn raw(&self, query: ChartQuery) -> Result<MarketChartResponse, FetchError> {
        Ok(self
            .client
            .http
            .get_market_chart(&self.client.asset, &query)
            .await?)
    }

    /// Validated price points in response order.
    pub async fn points(&self, query: ChartQuery) -> Result<Vec<PricePoint>, FetchError> {
        let resp = self.raw(query).await?;
        tracing::debug!(
            asset = %self.client.asset,
            vs_currency = query.vs_currency(),
            days = query.days(),
            pairs = resp.prices.len(),
            "market chart received"
        );
        price_points(resp)
    }

    /// Fetch and bucket in one call.
    pub async fn series(
        &self,
        query: ChartQuery,
        granularity: Granularity,
    ) -> Result<Series, FetchError> {
        let points = self.points(query).await?;
        Ok(bucket(points, granularity))
    }
}
