//! Handler for per-code click analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count for a short code.
///
/// # Endpoint
///
/// `GET /analytics/{code}`
///
/// Unknown codes report `0` clicks; they are not an error.
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store is unreachable.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let clicks = state.link_service.clicks(&code).await?;

    Ok(Json(AnalyticsResponse {
        short_code: code,
        clicks,
    }))
}
