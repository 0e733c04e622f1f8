//! Chart domain — declarative line chart configuration.
//!
//! The SDK does not draw anything. A presenter turns the current UI state and
//! series into plain data that a charting library can consume.

use crate::domain::dashboard::UiState;
use crate::domain::market_chart::Series;
use crate::shared::fmt::{format_date_label, format_fixed};
use crate::shared::{BucketKey, Currency, TimeRange};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pixel height of the rendered chart.
pub const CHART_HEIGHT: u32 = 450;

/// Decimals shown on price labels.
pub const PRICE_LABEL_DECIMALS: u32 = 2;

/// Maps UI state and a series to whatever a chart backend consumes.
pub trait ChartPresenter {
    type Output;

    fn present(&self, ui: &UiState, series: &Series) -> Self::Output;
}

/// How the x axis interprets its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Continuous time scale.
    Datetime,
    /// Discrete labels.
    Category,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub kind: AxisKind,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: BucketKey,
    pub y: Decimal,
    pub x_label: String,
    pub y_label: String,
}

/// A single-series line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub chart_type: String,
    pub height: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series_name: String,
    pub points: Vec<ChartPoint>,
}

/// Default presenter: the GSDT line chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartPresenter;

impl ChartPresenter for LineChartPresenter {
    type Output = ChartConfig;

    fn present(&self, ui: &UiState, series: &Series) -> ChartConfig {
        let points = series
            .keyed()
            .map(|(key, p)| ChartPoint {
                x_label: x_label(ui.range, &key),
                y_label: y_label(p.price),
                x: key,
                y: p.price,
            })
            .collect();

        ChartConfig {
            title: chart_title(ui.range),
            chart_type: "line".to_string(),
            height: CHART_HEIGHT,
            x_axis: Axis {
                kind: x_axis_kind(ui.range),
                title: x_axis_title(ui.range).to_string(),
            },
            y_axis: Axis {
                kind: AxisKind::Numeric,
                title: y_axis_title(ui.currency),
            },
            series_name: series_name(ui.currency),
            points,
        }
    }
}

// ─── Label rules ─────────────────────────────────────────────────────────────

/// `"Price (USD)"` / `"Price (INR)"`.
pub fn y_axis_title(currency: Currency) -> String {
    format!("Price ({})", currency.code())
}

pub fn x_axis_kind(range: TimeRange) -> AxisKind {
    match range {
        TimeRange::Month => AxisKind::Datetime,
        TimeRange::Today | TimeRange::Week => AxisKind::Category,
    }
}

pub fn x_axis_title(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Month => "Date",
        TimeRange::Today => "Hour",
        TimeRange::Week => "Time",
    }
}

pub fn series_name(currency: Currency) -> String {
    format!("Daily Price ({})", currency.code())
}

pub fn chart_title(range: TimeRange) -> String {
    format!("GSDT Daily Price Chart ({})", range.label())
}

/// Month shows `M/D/YYYY`; shorter ranges show the bucket key as is.
pub fn x_label(range: TimeRange, key: &BucketKey) -> String {
    match (range, key.date()) {
        (TimeRange::Month, Some(date)) => format_date_label(date),
        _ => key.to_string(),
    }
}

pub fn y_label(price: Decimal) -> String {
    format_fixed(price, PRICE_LABEL_DECIMALS)
}
