//! Handler for paths that match no route.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Returns 404 with the standard error body.
///
/// Reached for `/`, for `/analytics/` without a code, and for any path
/// with more segments than a route accepts.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({ "path": uri.path() }))
}
