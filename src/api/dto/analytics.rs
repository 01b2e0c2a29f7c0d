//! DTOs for the analytics endpoint.

use serde::Serialize;

/// Click count for a single short code.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub short_code: String,
    pub clicks: i64,
}
