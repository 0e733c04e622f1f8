//! Shared newtypes and utilities used across all domain modules.
//!
//! The enums serialize to the lowercase tokens the CoinGecko API and the CLI
//! use (`"usd"`, `"week"`, `"hour"`), so they can be used directly in wire
//! types and query strings without conversion.

pub mod fmt;

use crate::error::ParseError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Currency ────────────────────────────────────────────────────────────────

/// Quote currency for the price series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    /// Lowercase token sent as `vs_currency`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Inr => "inr",
        }
    }

    /// Uppercase code shown in chart labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
        }
    }

    /// The other currency: USD ↔ INR.
    pub fn toggled(self) -> Self {
        match self {
            Self::Usd => Self::Inr,
            Self::Inr => Self::Usd,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "inr" => Ok(Self::Inr),
            _ => Err(ParseError::new("currency", s)),
        }
    }
}

// ─── TimeRange ───────────────────────────────────────────────────────────────

/// How far back the chart looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    #[default]
    Month,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Value of the `days` query parameter.
    pub fn days(&self) -> u32 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Human label used in the chart title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Past 7 Days",
            Self::Month => "Past Month",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "1" => Ok(Self::Today),
            "week" | "7" => Ok(Self::Week),
            "month" | "30" => Ok(Self::Month),
            _ => Err(ParseError::new("time range", s)),
        }
    }
}

// ─── Granularity ─────────────────────────────────────────────────────────────

/// Bucket width used to sample the raw series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
}

impl Granularity {
    /// Today samples hourly; week and month sample daily.
    pub fn for_range(range: TimeRange) -> Self {
        match range {
            TimeRange::Today => Self::Hour,
            TimeRange::Week | TimeRange::Month => Self::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Truncated ISO-8601 (UTC) prefix: `YYYY-MM-DD` or `YYYY-MM-DDTHH`.
    fn key_format(&self) -> &'static str {
        match self {
            Self::Hour => "%Y-%m-%dT%H",
            Self::Day => "%Y-%m-%d",
        }
    }

    /// Bucket key for a timestamp.
    pub fn key(&self, timestamp: &DateTime<Utc>) -> BucketKey {
        BucketKey(timestamp.format(self.key_format()).to_string())
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "1h" => Ok(Self::Hour),
            "day" | "1d" => Ok(Self::Day),
            _ => Err(ParseError::new("granularity", s)),
        }
    }
}

/// How the bucket granularity is chosen for a fetch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GranularityPolicy {
    /// Derived from the time range (`Granularity::for_range`).
    #[default]
    ByRange,
    /// Same granularity for every range.
    Fixed(Granularity),
}

impl GranularityPolicy {
    pub fn resolve(&self, range: TimeRange) -> Granularity {
        match self {
            Self::ByRange => Granularity::for_range(range),
            Self::Fixed(g) => *g,
        }
    }
}

// ─── BucketKey ───────────────────────────────────────────────────────────────

/// Deduplication key: a timestamp truncated to its bucket (e.g. `"2024-03-01"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey(String);

impl BucketKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar day this key falls in.
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.0.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BucketKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BucketKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for BucketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BucketKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BucketKey(s))
    }
}
