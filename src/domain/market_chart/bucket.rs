//! First-write-wins bucketing of a raw price series.

use super::{PricePoint, Series};
use crate::shared::Granularity;
use std::collections::HashSet;

/// Sample `points` down to one point per bucket.
///
/// Points are visited in the order given. The first point seen for a bucket
/// is kept; any later point in the same bucket is dropped. The result is an
/// opening price per bucket, not an average or a close.
pub fn bucket<I>(points: I, granularity: Granularity) -> Series
where
    I: IntoIterator<Item = PricePoint>,
{
    let mut seen = HashSet::new();
    let points = points
        .into_iter()
        .filter(|p| seen.insert(granularity.key(&p.timestamp)))
        .collect();

    Series {
        granularity,
        points,
    }
}
