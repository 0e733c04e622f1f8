//! Domain modules organized as vertical slices.
//!
//! - `market_chart` — price points, wire types, bucketing, and the fetch sub-client
//! - `chart` — mapping from UI state and a series to a chart configuration
//! - `dashboard` — UI state and the controller that sequences fetch cycles

pub mod chart;
pub mod dashboard;
pub mod market_chart;
