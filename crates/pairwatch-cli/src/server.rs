//! axum router for the pair analysis service.
//!
//! `POST /analyze` validates the body, runs the analysis under the configured
//! retry policy and answers with the result record. Failures surface as
//! `{"detail": "<message>"}`:
//!
//! | Status | When |
//! |--------|------|
//! | 422 | body is not a valid `PairRequest` (nothing was fetched) |
//! | 400 | the analysis still failed after every retry |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pairwatch_core::{retry_async, AnalysisResult, PairAnalyzer, PairRequest, RetryConfig};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared, immutable state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<PairAnalyzer>,
    pub retry: RetryConfig,
}

impl AppState {
    pub fn new(analyzer: PairAnalyzer, retry: RetryConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            retry,
        }
    }
}

/// Error payload for every non-2xx answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

enum ApiError {
    Unprocessable(String),
    Analysis(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Unprocessable(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            Self::Analysis(detail) => (StatusCode::BAD_REQUEST, detail),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<PairRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;
    let query = request
        .validate()
        .map_err(|error| ApiError::Unprocessable(error.to_string()))?;

    let analyzer = Arc::clone(&state.analyzer);
    match retry_async(&state.retry, || analyzer.analyze(&query)).await {
        Ok(result) => Ok(Json(result)),
        Err(error) => {
            tracing::warn!(
                ticker_a = %query.ticker_a,
                ticker_b = %query.ticker_b,
                code = error.code(),
                %error,
                "analysis failed"
            );
            Err(ApiError::Analysis(error.to_string()))
        }
    }
}
