//! Shared fakes for behavior tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use pairwatch_core::{CloseHistory, DailyCloseRequest, PriceSource, SourceError};
use time::{Date, Duration, OffsetDateTime, Time};

/// In-memory upstream keyed by ticker.
///
/// Rows outside the requested range are filtered out the way a real provider
/// would. Unknown tickers answer with an empty history.
#[derive(Default)]
pub struct InMemorySource {
    responses: HashMap<String, Result<CloseHistory, SourceError>>,
    calls: Mutex<Vec<DailyCloseRequest>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers daily closes stamped at 14:30 UTC (a US market open).
    pub fn with_closes(mut self, ticker: &str, rows: Vec<(Date, Option<f64>)>) -> Self {
        let (timestamps, close): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .map(|(date, close)| (at_market_open(date), close))
            .unzip();
        self.responses
            .insert(ticker.to_owned(), Ok(CloseHistory::new(timestamps, close)));
        self
    }

    pub fn with_history(mut self, ticker: &str, history: CloseHistory) -> Self {
        self.responses.insert(ticker.to_owned(), Ok(history));
        self
    }

    pub fn with_error(mut self, ticker: &str, error: SourceError) -> Self {
        self.responses.insert(ticker.to_owned(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<DailyCloseRequest> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .clone()
    }

    pub fn calls_for(&self, ticker: &str) -> usize {
        self.calls()
            .iter()
            .filter(|req| req.symbol.as_str() == ticker)
            .count()
    }
}

impl PriceSource for InMemorySource {
    fn id(&self) -> &'static str {
        "in_memory"
    }

    fn daily_closes<'a>(
        &'a self,
        req: DailyCloseRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CloseHistory, SourceError>> + Send + 'a>> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push(req.clone());

        let response = match self.responses.get(req.symbol.as_str()) {
            Some(Ok(history)) => Ok(within_range(history, req.start, req.end)),
            Some(Err(error)) => Err(error.clone()),
            None => Ok(CloseHistory::default()),
        };
        Box::pin(async move { response })
    }
}

fn within_range(history: &CloseHistory, start: Date, end: Date) -> CloseHistory {
    let keep: Vec<bool> = history
        .timestamps
        .iter()
        .map(|ts| ts.date() >= start && ts.date() < end)
        .collect();
    let timestamps = history
        .timestamps
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|(ts, _)| *ts)
        .collect();

    CloseHistory {
        timestamps,
        close: history.close.as_ref().map(|close| {
            close
                .iter()
                .zip(&keep)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| *value)
                .collect()
        }),
    }
}

pub fn at_market_open(date: Date) -> OffsetDateTime {
    date.with_time(Time::from_hms(14, 30, 0).expect("valid time"))
        .assume_utc()
}

/// Consecutive calendar days from `start` with closes from `price(i)`.
pub fn daily(start: Date, days: usize, price: impl Fn(usize) -> f64) -> Vec<(Date, Option<f64>)> {
    (0..days)
        .map(|i| (start + Duration::days(i as i64), Some(price(i))))
        .collect()
}

/// Weekdays only, starting at `start`, until `count` rows exist.
pub fn weekdays(start: Date, count: usize, price: impl Fn(usize) -> f64) -> Vec<(Date, Option<f64>)> {
    let mut rows = Vec::with_capacity(count);
    let mut date = start;
    while rows.len() < count {
        if !matches!(date.weekday(), time::Weekday::Saturday | time::Weekday::Sunday) {
            rows.push((date, Some(price(rows.len()))));
        }
        date = date.next_day().expect("date in range");
    }
    rows
}
