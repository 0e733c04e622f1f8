//! UI state controller — owns `UiState` and the displayed series.
//!
//! Every state change (currency toggle, range selection, refresh, reset) runs
//! one fetch → bucket cycle. Cycles may overlap; each one takes a sequence
//! number when it is triggered and its result is applied only if no newer
//! cycle has been triggered since. The held series is swapped as a whole,
//! never edited.

use super::{CycleOutcome, UiState};
use crate::client::ChartClient;
use crate::domain::chart::ChartPresenter;
use crate::domain::market_chart::{bucket, ChartQuery, PricePoint, Series};
use crate::error::FetchError;
use crate::shared::{GranularityPolicy, TimeRange};

use async_lock::RwLock;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Anything that can answer a market chart query with raw price points.
pub trait MarketChartSource {
    fn fetch_points(
        &self,
        query: ChartQuery,
    ) -> impl Future<Output = Result<Vec<PricePoint>, FetchError>>;
}

impl MarketChartSource for ChartClient {
    async fn fetch_points(&self, query: ChartQuery) -> Result<Vec<PricePoint>, FetchError> {
        self.market_chart().points(query).await
    }
}

#[derive(Debug)]
struct Held {
    ui: UiState,
    series: Arc<Series>,
    last_error: Option<String>,
}

impl Held {
    fn fresh(ui: UiState, policy: GranularityPolicy) -> Self {
        Self {
            ui,
            series: Arc::new(Series::empty(policy.resolve(ui.range))),
            last_error: None,
        }
    }
}

pub struct ChartController<S> {
    source: S,
    policy: GranularityPolicy,
    held: RwLock<Held>,
    /// Sequence number of the most recently triggered cycle.
    issued: AtomicU64,
}

impl<S: MarketChartSource> ChartController<S> {
    /// Controller in the default state (USD, past month) with no data yet.
    pub fn new(source: S) -> Self {
        Self::with_state(source, UiState::default())
    }

    pub fn with_state(source: S, ui: UiState) -> Self {
        let policy = GranularityPolicy::default();
        Self {
            source,
            policy,
            held: RwLock::new(Held::fresh(ui, policy)),
            issued: AtomicU64::new(0),
        }
    }

    pub fn granularity_policy(mut self, policy: GranularityPolicy) -> Self {
        self.policy = policy;
        let held = self.held.get_mut();
        held.series = Arc::new(Series::empty(policy.resolve(held.ui.range)));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub async fn ui(&self) -> UiState {
        self.held.read().await.ui
    }

    /// The series from the latest applied cycle.
    pub async fn series(&self) -> Arc<Series> {
        self.held.read().await.series.clone()
    }

    /// Message of the last failed cycle, cleared by the next applied one.
    pub async fn last_error(&self) -> Option<String> {
        self.held.read().await.last_error.clone()
    }

    pub async fn chart<P: ChartPresenter>(&self, presenter: &P) -> P::Output {
        let held = self.held.read().await;
        presenter.present(&held.ui, &held.series)
    }

    // ── State changes ────────────────────────────────────────────────────

    /// Flip USD ↔ INR and fetch.
    pub async fn toggle_currency(&self) -> CycleOutcome {
        self.trigger(|held| held.ui.currency = held.ui.currency.toggled())
            .await
    }

    pub async fn select_range(&self, range: TimeRange) -> CycleOutcome {
        self.trigger(|held| held.ui.range = range).await
    }

    /// Re-fetch for the current state. Nothing else is touched.
    pub async fn refresh(&self) -> CycleOutcome {
        self.trigger(|_| {}).await
    }

    /// Back to the default state with no data or error, then fetch.
    pub async fn reset(&self) -> CycleOutcome {
        let policy = self.policy;
        self.trigger(|held| *held = Held::fresh(UiState::default(), policy))
            .await
    }

    // ── Cycle ────────────────────────────────────────────────────────────

    async fn trigger(&self, update: impl FnOnce(&mut Held)) -> CycleOutcome {
        let (seq, ui) = {
            let mut held = self.held.write().await;
            update(&mut held);
            (self.issued.fetch_add(1, Ordering::SeqCst) + 1, held.ui)
        };
        self.run_cycle(seq, ui).await
    }

    async fn run_cycle(&self, seq: u64, ui: UiState) -> CycleOutcome {
        let query = ui.query();
        let granularity = self.policy.resolve(ui.range);
        tracing::debug!(
            seq,
            vs_currency = query.vs_currency(),
            days = query.days(),
            %granularity,
            "fetch cycle started"
        );

        let result = self
            .source
            .fetch_points(query)
            .await
            .map(|points| bucket(points, granularity));

        let mut held = self.held.write().await;
        let latest = self.issued.load(Ordering::SeqCst);
        if seq != latest {
            tracing::warn!(seq, latest, "discarding stale market chart result");
            return CycleOutcome::Stale;
        }

        match result {
            Ok(series) => {
                let points = series.len();
                held.series = Arc::new(series);
                held.last_error = None;
                tracing::info!(
                    seq,
                    currency = %ui.currency,
                    range = %ui.range,
                    points,
                    "market chart applied"
                );
                CycleOutcome::Applied { points }
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "Error fetching market chart data");
                held.last_error = Some(e.to_string());
                CycleOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::LineChartPresenter;
    use crate::error::HttpError;
    use crate::shared::{Currency, Granularity};
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::task::Poll;
    use tokio::sync::oneshot;

    type Reply = Result<Vec<PricePoint>, FetchError>;

    /// Replays queued replies in call order and records every query.
    #[derive(Default)]
    struct Scripted {
        calls: Mutex<Vec<ChartQuery>>,
        replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    impl Scripted {
        fn ready(replies: Vec<Reply>) -> Self {
            let source = Self::default();
            for reply in replies {
                let (tx, rx) = oneshot::channel();
                let _ = tx.send(reply);
                source.replies.lock().unwrap().push_back(rx);
            }
            source
        }

        fn pending(n: usize) -> (Self, Vec<oneshot::Sender<Reply>>) {
            let source = Self::default();
            let mut senders = Vec::new();
            for _ in 0..n {
                let (tx, rx) = oneshot::channel();
                senders.push(tx);
                source.replies.lock().unwrap().push_back(rx);
            }
            (source, senders)
        }

        fn calls(&self) -> Vec<ChartQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MarketChartSource for Scripted {
        async fn fetch_points(&self, query: ChartQuery) -> Reply {
            self.calls.lock().unwrap().push(query);
            let rx = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch");
            rx.await.expect("reply sender dropped")
        }
    }

    const HOUR: i64 = 3_600_000;

    fn points(prices: &[(i64, f64)]) -> Vec<PricePoint> {
        prices
            .iter()
            .map(|&(ms, p)| {
                PricePoint::new(
                    DateTime::from_timestamp_millis(ms).unwrap(),
                    Decimal::try_from(p).unwrap(),
                )
            })
            .collect()
    }

    fn server_error() -> FetchError {
        FetchError::Http(HttpError::ServerError {
            status: 503,
            body: "unavailable".into(),
        })
    }

    #[tokio::test]
    async fn test_refresh_applies_series() {
        let source = Scripted::ready(vec![Ok(points(&[
            (0, 1.00),
            (HOUR, 1.02),
            (90_000_000, 0.99),
        ]))]);
        let controller = ChartController::new(source);

        let outcome = controller.refresh().await;
        assert_eq!(outcome, CycleOutcome::Applied { points: 2 });

        let series = controller.series().await;
        assert_eq!(series.granularity(), Granularity::Day);
        assert_eq!(series.points()[0].price, Decimal::ONE);
        assert_eq!(series.points()[1].price, Decimal::try_from(0.99).unwrap());
        assert_eq!(
            controller.source().calls(),
            vec![ChartQuery::new(Currency::Usd, TimeRange::Month)]
        );
    }

    #[tokio::test]
    async fn test_toggle_fetches_once_and_keeps_old_series() {
        let source = Scripted::ready(vec![
            Ok(points(&[(0, 1.0)])),
            Ok(points(&[(0, 83.2), (HOUR, 83.4)])),
        ]);
        let controller = ChartController::new(source);
        controller.refresh().await;
        let usd = controller.series().await;

        let outcome = controller.toggle_currency().await;
        assert!(outcome.is_applied());

        let calls = controller.source().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].vs_currency(), "inr");
        assert_eq!(calls[1].days(), 30);

        assert_eq!(usd.len(), 1);
        assert_eq!(usd.points()[0].price, Decimal::ONE);
        let inr = controller.series().await;
        assert!(!Arc::ptr_eq(&usd, &inr));
        assert_eq!(inr.points()[0].price, Decimal::try_from(83.2).unwrap());
        assert_eq!(controller.ui().await.currency, Currency::Inr);
    }

    #[tokio::test]
    async fn test_range_sets_days_and_granularity() {
        let source = Scripted::ready(vec![
            Ok(points(&[(0, 1.0), (HOUR, 1.1), (HOUR + 5, 1.2)])),
            Ok(points(&[(0, 1.0), (HOUR, 1.1)])),
        ]);
        let controller = ChartController::new(source);

        let today = controller.select_range(TimeRange::Today).await;
        assert_eq!(today, CycleOutcome::Applied { points: 2 });
        assert_eq!(controller.series().await.granularity(), Granularity::Hour);

        let week = controller.select_range(TimeRange::Week).await;
        assert_eq!(week, CycleOutcome::Applied { points: 1 });
        assert_eq!(controller.series().await.granularity(), Granularity::Day);

        let days: Vec<_> = controller.source().calls().iter().map(|q| q.days()).collect();
        assert_eq!(days, [1, 7]);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_series() {
        let source = Scripted::ready(vec![
            Ok(points(&[(0, 1.0)])),
            Err(server_error()),
            Ok(points(&[(0, 2.0)])),
        ]);
        let controller = ChartController::new(source);
        controller.refresh().await;
        let before = controller.series().await;

        assert_eq!(controller.refresh().await, CycleOutcome::Failed);
        assert!(Arc::ptr_eq(&before, &controller.series().await));
        let err = controller.last_error().await.unwrap();
        assert!(err.contains("503"), "unexpected error: {err}");

        assert!(controller.refresh().await.is_applied());
        assert_eq!(controller.last_error().await, None);
        assert_eq!(controller.series().await.points()[0].price, Decimal::from(2));
    }

    #[tokio::test]
    async fn test_failed_toggle_still_changes_state() {
        let source = Scripted::ready(vec![Err(server_error())]);
        let controller = ChartController::new(source);
        assert_eq!(controller.toggle_currency().await, CycleOutcome::Failed);
        assert_eq!(controller.ui().await.currency, Currency::Inr);
        assert!(controller.series().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_is_not_an_error() {
        let source = Scripted::ready(vec![Ok(Vec::new())]);
        let controller = ChartController::new(source);
        assert_eq!(controller.refresh().await, CycleOutcome::Applied { points: 0 });
        assert!(controller.series().await.is_empty());
        assert_eq!(controller.last_error().await, None);
    }

    #[test]
    fn test_newer_cycle_wins_when_it_resolves_first() {
        let (source, mut senders) = Scripted::pending(2);
        let controller = ChartController::new(source);

        let mut toggle = tokio_test::task::spawn(controller.toggle_currency());
        assert!(toggle.poll().is_pending());
        let mut week = tokio_test::task::spawn(controller.select_range(TimeRange::Week));
        assert!(week.poll().is_pending());

        let late = senders.pop().unwrap();
        let early = senders.pop().unwrap();

        late.send(Ok(points(&[(0, 84.0)]))).unwrap();
        assert_eq!(week.poll(), Poll::Ready(CycleOutcome::Applied { points: 1 }));

        early.send(Ok(points(&[(0, 83.0), (2 * 24 * HOUR, 83.5)]))).unwrap();
        assert_eq!(toggle.poll(), Poll::Ready(CycleOutcome::Stale));

        let series = tokio_test::block_on(controller.series());
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].price, Decimal::from(84));
    }

    #[test]
    fn test_older_cycle_resolving_first_is_discarded() {
        let (source, mut senders) = Scripted::pending(2);
        let controller = ChartController::new(source);

        let mut first = tokio_test::task::spawn(controller.refresh());
        assert!(first.poll().is_pending());
        let mut second = tokio_test::task::spawn(controller.select_range(TimeRange::Today));
        assert!(second.poll().is_pending());

        let late = senders.pop().unwrap();
        let early = senders.pop().unwrap();

        early.send(Ok(points(&[(0, 1.0)]))).unwrap();
        assert_eq!(first.poll(), Poll::Ready(CycleOutcome::Stale));
        assert!(tokio_test::block_on(controller.series()).is_empty());

        late.send(Err(server_error())).unwrap();
        assert_eq!(second.poll(), Poll::Ready(CycleOutcome::Failed));
        assert!(tokio_test::block_on(controller.last_error()).is_some());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let source = Scripted::ready(vec![
            Ok(points(&[(0, 1.0)])),
            Err(server_error()),
            Ok(points(&[(0, 1.0), (24 * HOUR, 1.1)])),
        ]);
        let controller =
            ChartController::with_state(source, UiState::new(Currency::Usd, TimeRange::Today));
        controller.refresh().await;
        controller.toggle_currency().await;
        assert!(controller.last_error().await.is_some());

        let outcome = controller.reset().await;
        assert_eq!(outcome, CycleOutcome::Applied { points: 2 });
        assert_eq!(controller.ui().await, UiState::default());
        assert_eq!(controller.last_error().await, None);
        assert_eq!(
            controller.source().calls().last(),
            Some(&ChartQuery::new(Currency::Usd, TimeRange::Month))
        );
    }

    #[tokio::test]
    async fn test_fixed_granularity_policy() {
        let source = Scripted::ready(vec![Ok(points(&[(0, 1.0), (HOUR, 1.1)]))]);
        let controller =
            ChartController::new(source).granularity_policy(GranularityPolicy::Fixed(Granularity::Hour));
        assert_eq!(controller.series().await.granularity(), Granularity::Hour);
        assert_eq!(controller.refresh().await, CycleOutcome::Applied { points: 2 });
    }

    #[tokio::test]
    async fn test_chart_reflects_current_state() {
        let source = Scripted::ready(vec![Ok(points(&[(0, 1.0)])), Ok(points(&[(0, 83.0)]))]);
        let controller = ChartController::new(source);
        controller.refresh().await;
        controller.toggle_currency().await;

        let chart = controller.chart(&LineChartPresenter).await;
        assert_eq!(chart.y_axis.title, "Price (INR)");
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].y_label, "83.00");
    }
}
