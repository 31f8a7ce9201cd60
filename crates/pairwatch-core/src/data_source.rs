//! Upstream source trait and request/response types.
//!
//! This module defines the contract (`PriceSource`) that a market-data
//! provider implements to feed the fetcher. The contract is deliberately
//! narrow: a ticker and a date range in, a table of timestamps and optional
//! closes out.
//!
//! # Example
//!
//! ```rust,ignore
//! use pairwatch_core::{DailyCloseRequest, PriceSource, SourceError, Symbol, YahooAdapter};
//! use time::macros::date;
//!
//! async fn closes(adapter: &YahooAdapter) -> Result<(), SourceError> {
//!     let request = DailyCloseRequest::new(
//!         Symbol::parse("KO").expect("valid"),
//!         date!(2024 - 01 - 01),
//!         date!(2024 - 04 - 01),
//!     )?;
//!     let history = adapter.daily_closes(request).await?;
//!     println!("{} rows", history.timestamps.len());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use time::{Date, OffsetDateTime};

use crate::Symbol;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    NotFound,
    Internal,
}

/// Structured upstream error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request for daily closes over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCloseRequest {
    pub symbol: Symbol,
    pub start: Date,
    /// Exclusive upper bound.
    pub end: Date,
}

impl DailyCloseRequest {
    pub fn new(symbol: Symbol, start: Date, end: Date) -> Result<Self, SourceError> {
        if start >= end {
            return Err(SourceError::invalid_request(format!(
                "daily close range for {symbol} is empty: {start} >= {end}"
            )));
        }
        Ok(Self { symbol, start, end })
    }
}

/// Raw upstream table of daily rows.
///
/// `close` is `None` when the provider returned no close column at all;
/// individual entries are `None` where the provider left a gap. When present,
/// `close` is positionally aligned with `timestamps`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloseHistory {
    pub timestamps: Vec<OffsetDateTime>,
    pub close: Option<Vec<Option<f64>>>,
}

impl CloseHistory {
    pub fn new(timestamps: Vec<OffsetDateTime>, close: Vec<Option<f64>>) -> Self {
        Self {
            timestamps,
            close: Some(close),
        }
    }

    /// A response with no usable close column.
    pub fn without_close(timestamps: Vec<OffsetDateTime>) -> Self {
        Self {
            timestamps,
            close: None,
        }
    }
}

/// Time-series provider contract.
///
/// The fetcher depends only on this trait, so the provider can be swapped for
/// another vendor or an in-memory fake.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` as one instance serves concurrent
/// analyses.
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn id(&self) -> &'static str;

    /// Fetches daily closes for `req.symbol` over `[req.start, req.end)`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if:
    /// - The provider is unavailable or rate limiting
    /// - The provider does not know the symbol
    /// - The response cannot be decoded
    fn daily_closes<'a>(
        &'a self,
        req: DailyCloseRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CloseHistory, SourceError>> + Send + 'a>>;
}
