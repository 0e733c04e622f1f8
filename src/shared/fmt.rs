//! Label formatting for chart axes.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a price with a fixed number of decimals, rounding half away from zero.
///
/// `1.005` → `"1.01"` at two places; `83` → `"83.00"`.
///
/// Rounding happens on the exact decimal, not on the nearest binary float. A
/// price that arrives as the f64 `1.005` (stored as `1.00499999...`) therefore
/// labels as `"1.01"`, where float-based `toFixed(2)` style formatting gives `"1.00"`.
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Short US-style date label: `3/1/2024`.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
