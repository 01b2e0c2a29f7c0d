//! Handlers for liveness and readiness checks.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, ReadinessChecks, ReadinessResponse};
use crate::state::AppState;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// Always answers `200 OK` with the body `OK` while the process serves
/// requests. Does not touch the store.
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Readiness probe with component checks.
///
/// # Endpoint
///
/// `GET /healthz/ready`
///
/// # Response Codes
///
/// - **200 OK**: store reachable and click queue accepting events
/// - **503 Service Unavailable**: one or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Reachable" },
///     "click_queue": { "status": "ok", "message": "Free slots: 10000/10000" }
///   }
/// }
/// ```
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let store_check = check_store(&state).await;
    let queue_check = check_click_queue(&state);

    let all_healthy = store_check.is_ok() && queue_check.is_ok();

    let response = ReadinessResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: ReadinessChecks {
            store: store_check,
            click_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.link_service.store().ping().await {
        Ok(()) => CheckStatus::ok("Reachable"),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    let tracker = state.link_service.click_tracker();

    if !tracker.is_running() {
        CheckStatus::error("Click worker is not running")
    } else {
        CheckStatus::ok(format!(
            "Free slots: {}/{}",
            tracker.available_capacity(),
            tracker.max_capacity()
        ))
    }
}
