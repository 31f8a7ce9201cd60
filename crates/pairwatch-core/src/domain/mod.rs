//! # Domain Models
//!
//! Canonical domain types for pair analysis.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, upper-cased ticker |
//! | [`PriceSeries`] | One instrument's daily closes, ascending by date |
//! | [`AlignedPair`] | Two series inner-joined on calendar date |
//! | [`PairRequest`] | Inbound analysis parameters (with defaults) |
//! | [`PairQuery`] | Validated analysis parameters |
//! | [`AnalysisResult`] | Correlation, ratio statistics and signal |
//! | [`Signal`] | Ratio divergence classification |
//!
//! ## Validation
//!
//! Invariants are enforced at construction time:
//!
//! ```rust,ignore
//! use pairwatch_core::{PriceSeries, Symbol};
//! use time::macros::date;
//!
//! let ticker = Symbol::parse("ko")?;
//! let series = PriceSeries::from_unordered(
//!     ticker,
//!     vec![(date!(2024 - 01 - 03), 59.1), (date!(2024 - 01 - 02), 58.7)],
//! )?;
//! assert_eq!(series.first_date(), Some(date!(2024 - 01 - 02)));
//! ```

mod analysis;
mod series;
mod symbol;

pub use analysis::{
    AnalysisResult, PairQuery, PairRequest, Signal, DEFAULT_CORR_THRESHOLD, DEFAULT_WINDOW_DAYS,
    MIN_WINDOW_DAYS, SIGNAL_Z_THRESHOLD,
};
pub use series::{AlignedPair, AlignedRow, PricePoint, PriceSeries};
pub use symbol::Symbol;
