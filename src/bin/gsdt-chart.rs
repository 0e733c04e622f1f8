//! Command-line front end: fetch one GSDT chart and print it.
//!
//! ```bash
//! cargo run --features cli -- --currency inr --range week
//! RUST_LOG=gsdt_chart=debug cargo run --features cli -- --range today --json
//! ```

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use gsdt_chart::network::{DEFAULT_API_URL, DEFAULT_ASSET, DEFAULT_TIMEOUT_SECS};
use gsdt_chart::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "gsdt-chart", version, about = "GSDT price history chart data")]
struct Cli {
    /// Quote currency: usd or inr.
    #[arg(long, default_value = "usd", env = "GSDT_CURRENCY")]
    currency: Currency,

    /// Time range: today, week, or month.
    #[arg(long, default_value = "month", env = "GSDT_RANGE")]
    range: TimeRange,

    /// Sample every range with one granularity (hour or day) instead of deriving it.
    #[arg(long)]
    granularity: Option<Granularity>,

    #[arg(long, default_value = DEFAULT_API_URL, env = "GSDT_API_URL")]
    base_url: String,

    /// CoinGecko coin id.
    #[arg(long, default_value = DEFAULT_ASSET)]
    asset: String,

    /// Request timeout in seconds; 0 disables it.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Retries for transient failures (429, 502-504, timeouts).
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Print the chart configuration as JSON.
    #[arg(long)]
    json: bool,
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));
    let client = ChartClient::builder()
        .base_url(&cli.base_url)
        .asset(&cli.asset)
        .timeout(timeout)
        .retry_policy(RetryPolicy::with_retries(cli.retries))
        .build()
        .context("building HTTP client")?;

    let policy = cli
        .granularity
        .map_or(GranularityPolicy::ByRange, GranularityPolicy::Fixed);
    let controller = ChartController::with_state(client, UiState::new(cli.currency, cli.range))
        .granularity_policy(policy);

    if controller.refresh().await == CycleOutcome::Failed {
        let reason = controller.last_error().await.unwrap_or_default();
        bail!("could not load market chart: {reason}");
    }

    let chart = controller.chart(&LineChartPresenter).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("{}", chart.title);
    println!("{:<16} {:>12}", chart.x_axis.title, chart.y_axis.title);
    for point in &chart.points {
        println!("{:<16} {:>12}", point.x_label, point.y_label);
    }
    if chart.points.is_empty() {
        println!("(no data)");
    }
    Ok(())
}
