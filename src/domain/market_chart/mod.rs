//! Market chart domain — price points, request shape, bucketed series.

pub mod bucket;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{BucketKey, Currency, Granularity, TimeRange};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use bucket::bucket;
pub use convert::price_points;

/// A single observed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// Parameters of one `market_chart` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartQuery {
    pub currency: Currency,
    pub range: TimeRange,
}

impl ChartQuery {
    pub fn new(currency: Currency, range: TimeRange) -> Self {
        Self { currency, range }
    }

    /// `vs_currency` query value.
    pub fn vs_currency(&self) -> &'static str {
        self.currency.as_str()
    }

    /// `days` query value.
    pub fn days(&self) -> u32 {
        self.range.days()
    }
}

/// Price history sampled to at most one point per bucket.
///
/// Points keep the order their buckets were first seen in, which is
/// chronological for the ascending responses the API returns. A series is
/// built in one pass by [`bucket`] and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    granularity: Granularity,
    points: Vec<PricePoint>,
}

impl Series {
    pub fn empty(granularity: Granularity) -> Self {
        Self {
            granularity,
            points: Vec::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Points paired with their bucket keys.
    pub fn keyed(&self) -> impl Iterator<Item = (BucketKey, &PricePoint)> + '_ {
        self.points
            .iter()
            .map(move |p| (self.granularity.key(&p.timestamp), p))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
