//! End-to-end pair analysis.
//!
//! [`PairAnalyzer::analyze`] fetches both tickers, aligns them and hands the
//! aligned pair to [`analyze_aligned`], which owns every statistic. Each step
//! either succeeds or ends the call with a typed [`AnalysisError`].

use std::sync::Arc;

use crate::align::{align_closes, MIN_OVERLAP_DAYS};
use crate::clock::{Clock, SystemClock};
use crate::data_source::PriceSource;
use crate::fetcher::fetch_daily_closes;
use crate::stats::{is_constant, mean, pearson, population_std, z_score};
use crate::{AlignedPair, AnalysisError, AnalysisResult, PairQuery, Signal};

/// Extra calendar days fetched beyond the window to absorb weekends,
/// holidays and calendar mismatches lost in alignment.
pub const LOOKBACK_PADDING_DAYS: usize = 40;

/// Stateless pair analysis over a shared upstream source.
#[derive(Clone)]
pub struct PairAnalyzer {
    source: Arc<dyn PriceSource>,
    clock: Arc<dyn Clock>,
}

impl PairAnalyzer {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    /// Runs the full pipeline for one pair.
    pub async fn analyze(&self, query: &PairQuery) -> Result<AnalysisResult, AnalysisError> {
        let today = self.clock.today();
        let lookback_days = u32::try_from(query.window_days.saturating_add(LOOKBACK_PADDING_DAYS))
            .unwrap_or(u32::MAX);

        let a = fetch_daily_closes(self.source.as_ref(), &query.ticker_a, lookback_days, today)
            .await?;
        let b = fetch_daily_closes(self.source.as_ref(), &query.ticker_b, lookback_days, today)
            .await?;

        let aligned = align_closes(&a, &b, MIN_OVERLAP_DAYS)?;
        let result = analyze_aligned(query, &aligned)?;

        tracing::info!(
            ticker_a = %result.ticker_a,
            ticker_b = %result.ticker_b,
            corr = result.corr,
            z_score = ?result.z_score,
            signal = ?result.signal,
            last_date = %result.last_date,
            "pair analyzed"
        );

        Ok(result)
    }
}

/// Computes the statistics over the trailing `query.window_days` rows.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientHistory`] when fewer aligned rows than
///   `window_days` exist
/// - [`AnalysisError::DivisionByZero`] when any window close of B is zero
/// - [`AnalysisError::UndefinedCorrelation`] when either close series is
///   constant across the window
pub fn analyze_aligned(
    query: &PairQuery,
    aligned: &AlignedPair,
) -> Result<AnalysisResult, AnalysisError> {
    if aligned.len() < query.window_days {
        return Err(AnalysisError::InsufficientHistory {
            actual: aligned.len(),
            required: query.window_days,
        });
    }

    let window = aligned.window(query.window_days);
    let (Some(last), true) = (window.last(), window.len() >= 2) else {
        return Err(AnalysisError::InsufficientHistory {
            actual: window.len(),
            required: query.window_days.max(2),
        });
    };

    let prices_a: Vec<f64> = window.iter().map(|row| row.price_a).collect();
    let prices_b: Vec<f64> = window.iter().map(|row| row.price_b).collect();

    let correlation = pearson(&prices_a, &prices_b);

    if prices_b.iter().any(|price| *price == 0.0) {
        return Err(AnalysisError::DivisionByZero);
    }

    let Some(correlation) = correlation else {
        let ticker = if is_constant(&prices_a) {
            query.ticker_a.clone()
        } else {
            query.ticker_b.clone()
        };
        return Err(AnalysisError::UndefinedCorrelation { ticker });
    };

    let ratios: Vec<f64> = prices_a
        .iter()
        .zip(&prices_b)
        .map(|(a, b)| a / b)
        .collect();
    let latest_ratio = last.price_a / last.price_b;
    // window is non-empty, so both are defined
    let ratio_mean = mean(&ratios).unwrap_or(latest_ratio);
    let ratio_std = population_std(&ratios).unwrap_or(0.0);
    let z = z_score(latest_ratio, ratio_mean, ratio_std);

    Ok(AnalysisResult {
        ticker_a: query.ticker_a.clone(),
        ticker_b: query.ticker_b.clone(),
        corr: correlation.coefficient,
        corr_pvalue: correlation.p_value,
        ratio_mean,
        ratio_std,
        latest_ratio,
        z_score: z,
        window_days: query.window_days,
        last_date: last.date.to_string(),
        corr_pass: correlation.coefficient >= query.corr_threshold,
        signal: Signal::classify(z),
    })
}
