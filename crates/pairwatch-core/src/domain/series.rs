use serde::{Deserialize, Serialize};
use time::Date;

use crate::{AnalysisError, Symbol};

/// Daily close for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub close: f64,
}

/// One instrument's daily closes.
///
/// Dates are strictly increasing, unique and time-of-day free; closes are
/// finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from rows in any order.
    ///
    /// Rows are sorted ascending by date. A row repeated verbatim collapses to
    /// one; two rows for the same date with different closes fail with
    /// [`AnalysisError::DuplicateDate`].
    pub fn from_unordered(
        ticker: Symbol,
        rows: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self, AnalysisError> {
        let mut points = rows
            .into_iter()
            .map(|(date, close)| PricePoint { date, close })
            .collect::<Vec<_>>();

        if let Some(point) = points.iter().find(|point| !point.close.is_finite()) {
            return Err(AnalysisError::NonFinitePrice {
                ticker,
                date: point.date,
            });
        }

        // stable sort keeps upstream order among equal dates
        points.sort_by_key(|point| point.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last() {
                Some(previous) if previous.date == point.date => {
                    if previous.close.to_bits() != point.close.to_bits() {
                        return Err(AnalysisError::DuplicateDate {
                            ticker,
                            date: point.date,
                        });
                    }
                }
                _ => deduped.push(point),
            }
        }

        Ok(Self {
            ticker,
            points: deduped,
        })
    }

    pub fn ticker(&self) -> &Symbol {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|point| point.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|point| point.date)
    }
}

/// A calendar date present in both series of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: Date,
    pub price_a: f64,
    pub price_b: f64,
}

/// Two series inner-joined on calendar date, ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedPair {
    rows: Vec<AlignedRow>,
}

impl AlignedPair {
    /// Wraps joined rows, sorting them ascending by date.
    pub fn from_rows(mut rows: Vec<AlignedRow>) -> Self {
        rows.sort_by_key(|row| row.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    /// The trailing `days` rows (most recent observations).
    ///
    /// Returns every row when fewer than `days` exist.
    pub fn window(&self, days: usize) -> &[AlignedRow] {
        let start = self.rows.len().saturating_sub(days);
        &self.rows[start..]
    }
}
