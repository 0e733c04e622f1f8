//! Retry policies for HTTP requests.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy for a request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt. Failures surface immediately.
    #[default]
    None,
    /// Retry transient failures with exponential backoff.
    Bounded(RetryConfig),
}

impl RetryPolicy {
    /// `Bounded` with the default `RetryConfig`.
    pub fn bounded() -> Self {
        Self::Bounded(RetryConfig::default())
    }

    /// `Bounded` with `max_retries` retries and default timings.
    pub fn with_retries(max_retries: u32) -> Self {
        if max_retries == 0 {
            return Self::None;
        }
        Self::Bounded(RetryConfig {
            max_retries,
            ..RetryConfig::default()
        })
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound for any single delay, applied after jitter and to server-requested delays.
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Whether `error` is transient under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            HttpError::Timeout => true,
            HttpError::Reqwest(re) => {
                #[cfg(not(target_arch = "wasm32"))]
                let transient = re.is_connect() || re.is_timeout();
                #[cfg(target_arch = "wasm32")]
                let transient = re.is_timeout();
                transient
            }
            _ => false,
        }
    }

    /// Delay before retry number `attempt` (0-indexed). Never exceeds `max_delay`.
    ///
    /// A server-provided `Retry-After` replaces the backoff, still capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(requested) = retry_after {
            return requested.min(self.max_delay);
        }

        let cap_ms = self.max_delay.as_millis() as f64;
        let base_ms = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = clamp_ms(base_ms, cap_ms);

        let final_ms = if self.jitter {
            let spread = (rand::random::<f64>() - 0.5) * 0.5;
            clamp_ms(capped * (1.0 + spread), cap_ms)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

/// Clamp to `[0, cap_ms]`. NaN (e.g. `0 * inf`) maps to the cap.
fn clamp_ms(ms: f64, cap_ms: f64) -> f64 {
    if ms.is_nan() {
        cap_ms
    } else {
        ms.clamp(0.0, cap_ms)
    }
}
