use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

pub const DEFAULT_WINDOW_DAYS: usize = 60;
pub const DEFAULT_CORR_THRESHOLD: f64 = 0.75;
/// Pearson correlation needs at least two observations.
pub const MIN_WINDOW_DAYS: usize = 2;
/// Absolute z-score at which the ratio counts as diverged.
pub const SIGNAL_Z_THRESHOLD: f64 = 2.0;

/// Direction in which the latest price ratio has diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Ratio is at least two standard deviations above its window mean.
    Upper,
    /// Ratio is at least two standard deviations below its window mean.
    Lower,
}

impl Signal {
    /// Classifies a z-score; an undefined z-score never signals.
    pub fn classify(z_score: Option<f64>) -> Option<Self> {
        let z = z_score?;
        if z >= SIGNAL_Z_THRESHOLD {
            Some(Self::Upper)
        } else if z <= -SIGNAL_Z_THRESHOLD {
            Some(Self::Lower)
        } else {
            None
        }
    }
}

/// Output of one pair analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker_a: Symbol,
    pub ticker_b: Symbol,
    /// Pearson correlation of the two close series over the window.
    pub corr: f64,
    /// Two-sided p-value for `corr`.
    pub corr_pvalue: f64,
    pub ratio_mean: f64,
    /// Population standard deviation (divisor N) of `A / B`.
    pub ratio_std: f64,
    pub latest_ratio: f64,
    /// `None` when `ratio_std` is exactly zero.
    pub z_score: Option<f64>,
    pub window_days: usize,
    /// Last date of the window, `YYYY-MM-DD`.
    pub last_date: String,
    pub corr_pass: bool,
    pub signal: Option<Signal>,
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}

fn default_corr_threshold() -> f64 {
    DEFAULT_CORR_THRESHOLD
}

/// Raw analysis parameters as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRequest {
    pub ticker_a: String,
    pub ticker_b: String,
    #[serde(default = "default_window_days")]
    pub window_days: usize,
    #[serde(default = "default_corr_threshold")]
    pub corr_threshold: f64,
}

impl PairRequest {
    /// Request with default window and threshold.
    pub fn new(ticker_a: impl Into<String>, ticker_b: impl Into<String>) -> Self {
        Self {
            ticker_a: ticker_a.into(),
            ticker_b: ticker_b.into(),
            window_days: DEFAULT_WINDOW_DAYS,
            corr_threshold: DEFAULT_CORR_THRESHOLD,
        }
    }

    pub fn with_window_days(mut self, window_days: usize) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn with_corr_threshold(mut self, corr_threshold: f64) -> Self {
        self.corr_threshold = corr_threshold;
        self
    }

    /// Upper-cases and validates the tickers and checks the parameters.
    pub fn validate(&self) -> Result<PairQuery, ValidationError> {
        let ticker_a = Symbol::parse(&self.ticker_a)?;
        let ticker_b = Symbol::parse(&self.ticker_b)?;

        if self.window_days < MIN_WINDOW_DAYS {
            return Err(ValidationError::WindowTooShort {
                value: self.window_days,
                min: MIN_WINDOW_DAYS,
            });
        }
        if !self.corr_threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold);
        }

        Ok(PairQuery {
            ticker_a,
            ticker_b,
            window_days: self.window_days,
            corr_threshold: self.corr_threshold,
        })
    }
}

/// Validated analysis parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PairQuery {
    pub ticker_a: Symbol,
    pub ticker_b: Symbol,
    pub window_days: usize,
    pub corr_threshold: f64,
}
