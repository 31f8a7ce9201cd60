//! # Pairwatch Core
//!
//! Pairs-trading signal computation over two instruments' daily closes.
//!
//! ## Overview
//!
//! This crate provides the analysis pipeline behind the `pairwatch` service:
//!
//! - **Domain models** for price series, aligned pairs and analysis results
//! - **Upstream source trait** so the market-data provider is swappable
//! - **Yahoo chart adapter** as the production upstream
//! - **Fetcher** that normalizes a provider response into a [`PriceSeries`]
//! - **Alignment** of two series onto their common trading days
//! - **Statistics** (Pearson correlation, ratio mean/std, z-score, signal)
//! - **Retry policy** used by the request layer around a whole analysis
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Upstream provider adapters (Yahoo) |
//! | [`align`] | Inner join of two series by calendar date |
//! | [`analyzer`] | End-to-end pair analysis |
//! | [`clock`] | Injected "today" for deterministic date ranges |
//! | [`data_source`] | Upstream source trait and request/response types |
//! | [`domain`] | Domain models |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Daily close fetch and normalization |
//! | [`http_client`] | HTTP client abstraction |
//! | [`retry`] | Fixed-delay retry around idempotent calls |
//! | [`stats`] | Correlation and ratio statistics |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pairwatch_core::{PairAnalyzer, PairRequest, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = PairAnalyzer::new(Arc::new(YahooAdapter::default()));
//!     let query = PairRequest::new("ko", "pep").validate()?;
//!     let result = analyzer.analyze(&query).await?;
//!
//!     println!("z = {:?}, signal = {:?}", result.z_score, result.signal);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Request layer  │──── retry (whole call)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PairAnalyzer   │────▶│ align + stats    │
//! └────────┬────────┘     └──────────────────┘
//!          │ x2
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Fetcher         │────▶│ PriceSource      │
//! │                 │     │ (Yahoo / fake)   │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod align;
pub mod analyzer;
pub mod clock;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod retry;
pub mod stats;

// Adapter implementations
pub use adapters::{YahooAdapter, YahooConfig};

// Analysis pipeline
pub use align::{align_closes, MIN_OVERLAP_DAYS};
pub use analyzer::{analyze_aligned, PairAnalyzer, LOOKBACK_PADDING_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use fetcher::fetch_daily_closes;

// Data source trait and types
pub use data_source::{CloseHistory, DailyCloseRequest, PriceSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{
    AlignedPair, AlignedRow, AnalysisResult, PairQuery, PairRequest, PricePoint, PriceSeries,
    Signal, Symbol,
};

// Error types
pub use error::{AnalysisError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Retry logic
pub use retry::{retry_async, RetryConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};

// Statistics
pub use stats::{mean, pearson, population_std, z_score, Correlation};
