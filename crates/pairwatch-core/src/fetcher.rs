//! Daily close fetch and normalization.

use time::{Date, Duration};

use crate::data_source::{DailyCloseRequest, PriceSource, SourceErrorKind};
use crate::{AnalysisError, PriceSeries, Symbol};

/// Fetches `symbol`'s daily closes for the `lookback_days` before `today`.
///
/// The requested range is `[today - lookback_days, today + 1)`; the extra day
/// tolerates the provider's exclusive end and timezone skew. Rows without a
/// close are dropped and timestamps are reduced to their calendar date.
///
/// # Errors
///
/// - [`AnalysisError::DataUnavailable`] when the provider has no close column,
///   no rows, or does not know the symbol
/// - [`AnalysisError::Upstream`] for any other provider failure
/// - [`AnalysisError::DuplicateDate`] when two rows land on one date with
///   different closes
pub async fn fetch_daily_closes(
    source: &dyn PriceSource,
    symbol: &Symbol,
    lookback_days: u32,
    today: Date,
) -> Result<PriceSeries, AnalysisError> {
    let upstream = |source_error| AnalysisError::Upstream {
        ticker: symbol.clone(),
        source: source_error,
    };

    let start = today
        .checked_sub(Duration::days(i64::from(lookback_days)))
        .unwrap_or(Date::MIN);
    let end = today.next_day().unwrap_or(Date::MAX);
    let request = DailyCloseRequest::new(symbol.clone(), start, end).map_err(upstream)?;

    tracing::debug!(
        source = source.id(),
        %symbol,
        %start,
        %end,
        "fetching daily closes"
    );

    let history = match source.daily_closes(request).await {
        Ok(history) => history,
        Err(error) if error.kind() == SourceErrorKind::NotFound => {
            tracing::warn!(%symbol, %error, "source does not know symbol");
            return Err(AnalysisError::DataUnavailable {
                ticker: symbol.clone(),
            });
        }
        Err(error) => return Err(upstream(error)),
    };

    let Some(close) = history.close else {
        return Err(AnalysisError::DataUnavailable {
            ticker: symbol.clone(),
        });
    };

    let rows = history
        .timestamps
        .iter()
        .zip(close)
        .filter_map(|(ts, close)| close.map(|close| (ts.date(), close)));
    let series = PriceSeries::from_unordered(symbol.clone(), rows)?;

    if series.is_empty() {
        return Err(AnalysisError::DataUnavailable {
            ticker: symbol.clone(),
        });
    }

    tracing::debug!(
        %symbol,
        rows = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "fetched daily closes"
    );

    Ok(series)
}
