//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Internal to the SDK — `ChartClient` wraps this.

use crate::domain::market_chart::wire::MarketChartResponse;
use crate::domain::market_chart::ChartQuery;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl CoinGeckoHttp {
    /// `timeout` is ignored on wasm32, where the browser owns request lifetimes.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
            builder = builder.pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub(crate) fn market_chart_url(&self, asset: &str, query: &ChartQuery) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(asset),
            query.vs_currency(),
            query.days()
        )
    }

    pub async fn get_market_chart(
        &self,
        asset: &str,
        query: &ChartQuery,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = self.market_chart_url(asset, query);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let config = match &self.retry {
            RetryPolicy::None => return self.do_get(url).await,
            RetryPolicy::Bounded(c) => c,
        };

        let mut attempt = 0;
        loop {
            let err = match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            if !config.should_retry(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            let retry_after = match &err {
                HttpError::RateLimited { retry_after_ms } => {
                    retry_after_ms.map(Duration::from_millis)
                }
                _ => None,
            };
            let delay = config.delay_for(attempt, retry_after);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying request to {}",
                url
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;

        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(error_for_response(resp).await)
    }
}

async fn error_for_response(resp: Response) -> HttpError {
    let status = resp.status().as_u16();
    let retry_after_ms = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after_ms);
    let body = resp.text().await.unwrap_or_default();
    status_error(status, body, retry_after_ms)
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn parse_retry_after_ms(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().map(|s| s.saturating_mul(1000))
}

fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest { status, body },
        _ => HttpError::ServerError { status, body },
    }
}
