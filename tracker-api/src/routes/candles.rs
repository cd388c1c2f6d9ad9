//! Historical bars endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracker_core::TrackerError;
use tracing::{error, info};

use crate::AppState;

/// Query parameters for candles
///
/// Both are kept as raw strings: a bad `minutes` must fall back to the
/// default window rather than fail extraction.
#[derive(Debug, Deserialize)]
pub struct CandlesQuery {
    pub symbol: Option<String>,
    /// Window length in minutes (1-5000)
    pub minutes: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create candle routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/candles", get(get_candles))
}

/// Get price bars for a symbol
async fn get_candles(
    State(state): State<AppState>,
    Query(params): Query<CandlesQuery>,
) -> impl IntoResponse {
    info!("Getting candles with params: {:?}", params);

    match state
        .bars_service
        .query(params.symbol.as_deref(), params.minutes.as_deref())
        .await
    {
        Ok(candles) => (StatusCode::OK, Json(candles)).into_response(),
        Err(TrackerError::InvalidArgument(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        Err(e) => {
            error!(
                "Failed to fetch candles for {:?}: {}",
                params.symbol.as_deref().unwrap_or_default(),
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
