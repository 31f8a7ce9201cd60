//! Inner join of two price series by calendar date.

use std::cmp::Ordering;

use crate::{AlignedPair, AlignedRow, AnalysisError, PriceSeries};

/// Minimum common trading days the analysis pipeline accepts.
pub const MIN_OVERLAP_DAYS: usize = 10;

/// Joins `a` and `b` on exact date equality.
///
/// Only dates present in both series survive. Both inputs are already sorted
/// and unique, so a single merge pass yields ascending, unique rows.
///
/// # Errors
///
/// [`AnalysisError::InsufficientOverlap`] when fewer than `min_days` dates are
/// shared.
pub fn align_closes(
    a: &PriceSeries,
    b: &PriceSeries,
    min_days: usize,
) -> Result<AlignedPair, AnalysisError> {
    let (left, right) = (a.points(), b.points());
    let mut rows = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].date.cmp(&right[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                rows.push(AlignedRow {
                    date: left[i].date,
                    price_a: left[i].close,
                    price_b: right[j].close,
                });
                i += 1;
                j += 1;
            }
        }
    }

    tracing::debug!(
        ticker_a = %a.ticker(),
        ticker_b = %b.ticker(),
        rows_a = left.len(),
        rows_b = right.len(),
        common = rows.len(),
        "aligned daily closes"
    );

    if rows.len() < min_days {
        return Err(AnalysisError::InsufficientOverlap {
            actual: rows.len(),
            required: min_days,
        });
    }

    Ok(AlignedPair::from_rows(rows))
}
