//! Behavior-driven tests for the pair analysis pipeline
//!
//! These tests drive `PairAnalyzer` end to end over an in-memory upstream and
//! check what a caller observes: the result record or the failure message.

mod common;

use std::sync::Arc;

use common::{daily, weekdays, InMemorySource};
use pairwatch_core::{
    AnalysisError, FixedClock, PairAnalyzer, PairRequest, Signal, SourceError, Symbol,
};
use time::macros::date;
use time::Duration;

fn analyzer(source: Arc<InMemorySource>, today: time::Date) -> PairAnalyzer {
    PairAnalyzer::new(source).with_clock(Arc::new(FixedClock(today)))
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn when_ratio_is_constant_result_has_full_correlation_and_no_signal() {
    // Given: A rises 100 -> 160 and B 50 -> 80 over 2024-01-01..2024-03-15
    let start = date!(2024 - 01 - 01);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("AAA", daily(start, 75, |i| 100.0 + 60.0 * i as f64 / 74.0))
            .with_closes("BBB", daily(start, 75, |i| 50.0 + 30.0 * i as f64 / 74.0)),
    );

    // When: the pair is analyzed with the default window and threshold
    let query = PairRequest::new("aaa", "bbb").validate().expect("valid");
    let result = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect("analysis should succeed");

    // Then: the pair is perfectly correlated and the ratio never moves
    assert_eq!(result.ticker_a.as_str(), "AAA");
    assert_eq!(result.ticker_b.as_str(), "BBB");
    assert!((result.corr - 1.0).abs() < 1e-9, "corr = {}", result.corr);
    assert!(result.corr_pass);
    assert!(result.ratio_std.abs() < 1e-12);
    assert_eq!(result.ratio_mean, 2.0);
    assert_eq!(result.latest_ratio, 2.0);
    assert_eq!(result.z_score, None);
    assert_eq!(result.signal, None);
    assert_eq!(result.window_days, 60);
    assert_eq!(result.last_date, "2024-03-15");
}

#[tokio::test]
async fn when_latest_ratio_spikes_result_signals_upper() {
    // Given: a steady pair whose last close of A jumps 10%
    let start = date!(2024 - 01 - 01);
    let mut a = weekdays(start, 70, |i| 100.0 + (i % 5) as f64);
    let b = weekdays(start, 70, |i| 50.0 + (i % 5) as f64 / 2.0);
    if let Some(last) = a.last_mut() {
        last.1 = last.1.map(|close| close * 1.1);
    }
    let today = b.last().map(|row| row.0).expect("rows");
    let source = Arc::new(InMemorySource::new().with_closes("KO", a).with_closes("PEP", b));

    // When
    let query = PairRequest::new("KO", "PEP").validate().expect("valid");
    let result = analyzer(source, today)
        .analyze(&query)
        .await
        .expect("analysis should succeed");

    // Then: the ratio sits far above its window mean
    let z = result.z_score.expect("ratio varies");
    assert!(z >= 2.0, "z = {z}");
    assert_eq!(result.signal, Some(Signal::Upper));
    assert!(result.latest_ratio > result.ratio_mean);
}

#[tokio::test]
async fn when_series_have_different_calendars_only_common_days_are_used() {
    // Given: B is missing every tenth weekday (exchange holidays)
    let start = date!(2024 - 01 - 01);
    let a = weekdays(start, 90, |i| 100.0 + i as f64);
    let b: Vec<_> = weekdays(start, 90, |i| 200.0 + 2.0 * i as f64)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 10 != 3)
        .map(|(_, row)| row)
        .collect();
    let today = a.last().map(|row| row.0).expect("rows");
    let source = Arc::new(InMemorySource::new().with_closes("A", a).with_closes("B", b));

    // When
    let query = PairRequest::new("A", "B")
        .with_window_days(20)
        .validate()
        .expect("valid");
    let result = analyzer(source, today)
        .analyze(&query)
        .await
        .expect("analysis should succeed");

    // Then: prices line up row by row, so the ratio is exactly one half
    assert_eq!(result.ratio_mean, 0.5);
    assert_eq!(result.ratio_std, 0.0);
    assert_eq!(result.last_date, today.to_string());
}

#[tokio::test]
async fn analysis_requests_window_plus_padding_of_history() {
    let start = date!(2024 - 01 - 01);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 75, |i| 10.0 + i as f64))
            .with_closes("B", daily(start, 75, |i| 20.0 + (i * i) as f64)),
    );
    let today = date!(2024 - 03 - 15);

    let query = PairRequest::new("A", "B")
        .with_window_days(30)
        .validate()
        .expect("valid");
    analyzer(Arc::clone(&source), today)
        .analyze(&query)
        .await
        .expect("analysis should succeed");

    let calls = source.calls();
    assert_eq!(calls.len(), 2);
    for call in calls {
        assert_eq!(call.start, today - Duration::days(70));
        assert_eq!(call.end, today + Duration::days(1));
    }
}

#[tokio::test]
async fn concurrent_analyses_on_one_analyzer_are_independent() {
    let start = date!(2024 - 01 - 01);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 75, |i| 10.0 + (i % 7) as f64))
            .with_closes("B", daily(start, 75, |i| 20.0 + (i % 5) as f64))
            .with_closes("C", daily(start, 75, |i| 30.0 + i as f64)),
    );
    let analyzer = analyzer(source, date!(2024 - 03 - 15));
    assert_eq!(analyzer.source_id(), "in_memory");

    let ab = PairRequest::new("A", "B").validate().expect("valid");
    let ac = PairRequest::new("A", "C").validate().expect("valid");

    let (first, second, again) = tokio::join!(
        analyzer.analyze(&ab),
        analyzer.analyze(&ac),
        analyzer.analyze(&ab)
    );

    let first = first.expect("A/B should succeed");
    let second = second.expect("A/C should succeed");
    assert_eq!(first, again.expect("A/B should succeed again"));
    assert_ne!(first.ticker_b, second.ticker_b);
}

// =============================================================================
// Failure policies
// =============================================================================

#[tokio::test]
async fn when_ticker_has_no_data_error_names_that_ticker() {
    let start = date!(2024 - 01 - 01);
    let source = Arc::new(
        InMemorySource::new().with_closes("KO", daily(start, 75, |i| 50.0 + i as f64)),
    );

    let query = PairRequest::new("KO", "NOPE").validate().expect("valid");
    let err = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("missing ticker must fail");

    assert_eq!(
        err,
        AnalysisError::DataUnavailable {
            ticker: Symbol::parse("NOPE").expect("valid"),
        }
    );
    assert_eq!(err.to_string(), "No close data for NOPE");
}

#[tokio::test]
async fn when_first_ticker_fails_second_is_never_fetched() {
    let source = Arc::new(
        InMemorySource::new().with_error("KO", SourceError::unavailable("upstream hiccup")),
    );

    let query = PairRequest::new("KO", "PEP").validate().expect("valid");
    let err = analyzer(Arc::clone(&source), date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("must fail");

    assert!(matches!(err, AnalysisError::Upstream { .. }));
    assert_eq!(source.calls_for("PEP"), 0);
}

#[tokio::test]
async fn nine_common_days_fail_with_insufficient_overlap() {
    let start = date!(2024 - 03 - 01);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 9, |i| 10.0 + i as f64))
            .with_closes("B", daily(start, 15, |i| 20.0 + (i * i) as f64)),
    );

    let query = PairRequest::new("A", "B")
        .with_window_days(5)
        .validate()
        .expect("valid");
    let err = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("must fail");

    assert_eq!(
        err.to_string(),
        "Insufficient overlapping trading days: 9 (< 10)"
    );
}

#[tokio::test]
async fn ten_common_days_pass_the_overlap_check() {
    let start = date!(2024 - 03 - 01);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 10, |i| 10.0 + i as f64))
            .with_closes("B", daily(start, 15, |i| 20.0 + (i * i) as f64)),
    );

    let query = PairRequest::new("A", "B")
        .with_window_days(5)
        .validate()
        .expect("valid");
    let result = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect("ten days suffice");

    assert_eq!(result.last_date, "2024-03-10");
}

#[tokio::test]
async fn overlap_shorter_than_window_fails_with_insufficient_history() {
    let start = date!(2024 - 02 - 15);
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 30, |i| 10.0 + i as f64))
            .with_closes("B", daily(start, 30, |i| 20.0 + (i * i) as f64)),
    );

    let query = PairRequest::new("A", "B").validate().expect("valid");
    let err = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("must fail");

    assert_eq!(
        err,
        AnalysisError::InsufficientHistory {
            actual: 30,
            required: 60,
        }
    );
}

#[tokio::test]
async fn zero_close_for_b_in_window_fails_with_division_by_zero() {
    let start = date!(2024 - 01 - 01);
    let b = daily(start, 75, |i| if i == 70 { 0.0 } else { 20.0 + i as f64 });
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", daily(start, 75, |i| 10.0 + i as f64))
            .with_closes("B", b),
    );

    let query = PairRequest::new("A", "B").validate().expect("valid");
    let err = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("must fail");

    assert_eq!(err, AnalysisError::DivisionByZero);
    assert_eq!(err.to_string(), "Share B has zero close value in window.");
}

#[tokio::test]
async fn conflicting_duplicate_dates_fail_loudly() {
    let start = date!(2024 - 01 - 01);
    let mut a = daily(start, 75, |i| 10.0 + i as f64);
    a.push((date!(2024 - 03 - 01), Some(999.0)));
    let source = Arc::new(
        InMemorySource::new()
            .with_closes("A", a)
            .with_closes("B", daily(start, 75, |i| 20.0 + i as f64)),
    );

    let query = PairRequest::new("A", "B").validate().expect("valid");
    let err = analyzer(source, date!(2024 - 03 - 15))
        .analyze(&query)
        .await
        .expect_err("must fail");

    assert!(matches!(err, AnalysisError::DuplicateDate { .. }));
}
