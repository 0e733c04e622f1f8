//! Dashboard domain — the UI state that drives fetch cycles.

#[cfg(feature = "http")]
pub mod controller;

use crate::domain::market_chart::ChartQuery;
use crate::shared::{Currency, TimeRange};
use serde::{Deserialize, Serialize};

/// Selected currency and time range. Defaults to USD over the past month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UiState {
    pub currency: Currency,
    pub range: TimeRange,
}

impl UiState {
    pub fn new(currency: Currency, range: TimeRange) -> Self {
        Self { currency, range }
    }

    /// Request parameters for this state.
    pub fn query(&self) -> ChartQuery {
        ChartQuery::new(self.currency, self.range)
    }
}

impl From<UiState> for ChartQuery {
    fn from(ui: UiState) -> Self {
        ui.query()
    }
}

/// Result of one fetch cycle as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The series was replaced.
    Applied { points: usize },
    /// A newer cycle was triggered first; the result was dropped.
    Stale,
    /// Fetch failed; the previous series is still held.
    Failed,
}

impl CycleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
