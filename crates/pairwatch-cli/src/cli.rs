//! CLI argument definitions for pairwatch.
//!
//! Every option can also be set through a `PAIRWATCH_*` environment
//! variable; flags win over the environment.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP service (`POST /analyze`, `GET /health`) |
//! | `analyze` | Analyze one pair and print the result as JSON |
//!
//! # Global Options
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--timeout-ms` | `PAIRWATCH_TIMEOUT_MS` | `10000` |
//! | `--yahoo-base-url` | `PAIRWATCH_YAHOO_BASE_URL` | `https://query1.finance.yahoo.com` |
//! | `--log-json` | `PAIRWATCH_LOG_JSON` | `false` |
//!
//! # Examples
//!
//! ```bash
//! pairwatch serve --port 8000
//! pairwatch analyze KO PEP --window-days 90 --pretty
//! ```

use clap::{Args, Parser, Subcommand};
use pairwatch_core::adapters::yahoo::DEFAULT_BASE_URL;
use pairwatch_core::domain::{DEFAULT_CORR_THRESHOLD, DEFAULT_WINDOW_DAYS};
use pairwatch_core::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};

/// Pairs-trading monitor over daily closes.
#[derive(Debug, Parser)]
#[command(
    name = "pairwatch",
    author,
    version,
    about = "Correlation and price-ratio monitor for pairs of tickers"
)]
pub struct Cli {
    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true, env = "PAIRWATCH_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Base URL of the Yahoo chart API.
    #[arg(long, global = true, env = "PAIRWATCH_YAHOO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub yahoo_base_url: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "PAIRWATCH_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    ///
    /// # Examples
    ///
    ///   pairwatch serve
    ///   pairwatch serve --host 127.0.0.1 --port 9000 --retry-attempts 0
    Serve(ServeArgs),

    /// Analyze one pair and print the result.
    ///
    /// # Examples
    ///
    ///   pairwatch analyze KO PEP
    ///   pairwatch analyze XOM CVX --window-days 120 --corr-threshold 0.8 --pretty
    Analyze(AnalyzeArgs),
}

/// Arguments for the `serve` command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long, env = "PAIRWATCH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "PAIRWATCH_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Retries after a failed analysis before answering 400.
    #[arg(long, env = "PAIRWATCH_RETRY_ATTEMPTS", default_value_t = DEFAULT_MAX_RETRIES)]
    pub retry_attempts: u32,

    /// Pause before each retry, in milliseconds.
    #[arg(long, env = "PAIRWATCH_RETRY_DELAY_MS", default_value_t = DEFAULT_RETRY_DELAY.as_millis() as u64)]
    pub retry_delay_ms: u64,
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// First ticker (numerator of the ratio).
    pub ticker_a: String,

    /// Second ticker (denominator of the ratio).
    pub ticker_b: String,

    /// Trailing aligned trading days used for the statistics.
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window_days: usize,

    /// Minimum correlation for `corr_pass`.
    #[arg(long, default_value_t = DEFAULT_CORR_THRESHOLD, allow_negative_numbers = true)]
    pub corr_threshold: f64,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
