//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The click is queued for the background worker once the `Location` header
/// is built, and is not awaited. A full queue drops the click; the redirect
/// is still served.
///
/// CR and LF in the stored URL are sent as spaces, and other control
/// characters are percent-encoded.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the store lookup fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let location = state.link_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
