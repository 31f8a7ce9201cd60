use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, OffsetDateTime, Time, UtcOffset};

use crate::data_source::{CloseHistory, DailyCloseRequest, PriceSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const REFERER: &str = "https://finance.yahoo.com/";

/// Connection settings for the Yahoo chart endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
        }
    }
}

/// Daily closes from Yahoo Finance's v8 chart API.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    config: YahooConfig,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()), YahooConfig::default())
    }
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: YahooConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn chart_url(&self, req: &DailyCloseRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(req.symbol.as_str()),
            unix_midnight(req.start),
            unix_midnight(req.end),
        )
    }

    async fn fetch_chart(&self, req: DailyCloseRequest) -> Result<CloseHistory, SourceError> {
        let url = self.chart_url(&req);
        tracing::debug!(symbol = %req.symbol, %url, "requesting yahoo chart");

        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        match response.status {
            status if (200..300).contains(&status) => {}
            404 => {
                return Err(SourceError::not_found(format!(
                    "yahoo has no chart for {}",
                    req.symbol
                )))
            }
            429 => {
                return Err(SourceError::rate_limited(
                    "yahoo returned status 429 (too many requests)",
                ))
            }
            status => {
                return Err(SourceError::unavailable(format!(
                    "yahoo returned status {status}"
                )))
            }
        }

        parse_chart(&response.body)
    }
}

impl PriceSource for YahooAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn daily_closes<'a>(
        &'a self,
        req: DailyCloseRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CloseHistory, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_chart(req))
    }
}

/// Decodes a chart body into a [`CloseHistory`].
///
/// Timestamps are shifted into the exchange's UTC offset (`meta.gmtoffset`)
/// so that taking the calendar date yields the trading day.
fn parse_chart(body: &str) -> Result<CloseHistory, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        let message = format!("yahoo chart API error: {}", error.description);
        return Err(if error.code.eq_ignore_ascii_case("not found") {
            SourceError::not_found(message)
        } else {
            SourceError::unavailable(message)
        });
    }

    let Some(result) = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(CloseHistory::default());
    };

    let offset = result
        .meta
        .and_then(|meta| meta.gmtoffset)
        .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
        .unwrap_or(UtcOffset::UTC);

    let Some(raw_timestamps) = result.timestamp else {
        return Ok(CloseHistory::default());
    };

    let timestamps = raw_timestamps
        .into_iter()
        .map(|ts| {
            OffsetDateTime::from_unix_timestamp(ts)
                .map(|value| value.to_offset(offset))
                .map_err(|e| SourceError::internal(format!("invalid timestamp {ts}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let close = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .and_then(|quote| quote.close);

    match close {
        Some(close) if close.len() == timestamps.len() => Ok(CloseHistory::new(timestamps, close)),
        Some(close) => Err(SourceError::internal(format!(
            "yahoo chart has {} timestamps but {} closes",
            timestamps.len(),
            close.len()
        ))),
        None => Ok(CloseHistory::without_close(timestamps)),
    }
}

fn unix_midnight(date: Date) -> i64 {
    date.with_time(Time::MIDNIGHT).assume_utc().unix_timestamp()
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<YahooChartIndicators>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}
