use thiserror::Error;
use time::Date;

use crate::{SourceError, Symbol};

/// Validation errors for tickers and analysis parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("window_days must be at least {min}, got {value}")]
    WindowTooShort { value: usize, min: usize },
    #[error("corr_threshold must be a finite number")]
    NonFiniteThreshold,
}

/// Terminal failures of a single pair analysis.
///
/// Display strings are the human-readable messages that the request layer
/// hands back to clients verbatim.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No close data for {ticker}")]
    DataUnavailable { ticker: Symbol },

    #[error("upstream request for {ticker} failed: {source}")]
    Upstream {
        ticker: Symbol,
        #[source]
        source: SourceError,
    },

    #[error("{ticker} returned conflicting closes for {date}")]
    DuplicateDate { ticker: Symbol, date: Date },

    #[error("{ticker} returned a non-finite close for {date}")]
    NonFinitePrice { ticker: Symbol, date: Date },

    #[error("Insufficient overlapping trading days: {actual} (< {required})")]
    InsufficientOverlap { actual: usize, required: usize },

    #[error("Not enough common trading days: {actual} < {required}")]
    InsufficientHistory { actual: usize, required: usize },

    #[error("Share B has zero close value in window.")]
    DivisionByZero,

    #[error("correlation is undefined: {ticker} close is constant across the window")]
    UndefinedCorrelation { ticker: Symbol },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// Stable machine-readable code for logs and metrics labels.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "analysis.data_unavailable",
            Self::Upstream { .. } => "analysis.upstream",
            Self::DuplicateDate { .. } => "analysis.duplicate_date",
            Self::NonFinitePrice { .. } => "analysis.non_finite_price",
            Self::InsufficientOverlap { .. } => "analysis.insufficient_overlap",
            Self::InsufficientHistory { .. } => "analysis.insufficient_history",
            Self::DivisionByZero => "analysis.division_by_zero",
            Self::UndefinedCorrelation { .. } => "analysis.undefined_correlation",
            Self::Validation(_) => "analysis.validation",
        }
    }
}
