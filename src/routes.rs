//! Top-level router built from the route table.
//!
//! # Route Structure
//!
//! - `POST /shorten`          - Create a short link
//! - `GET  /healthz`          - Liveness
//! - `GET  /healthz/ready`    - Readiness
//! - `GET  /analytics/{code}` - Click count
//! - `GET  /{code}`           - Redirect
//!
//! Anything else answers 404 with the JSON error body. A known path with the
//! wrong method answers 405.
//!
//! # Middleware
//!
//! - **Path normalization** - Trailing slashes are trimmed before routing
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::{
    analytics_handler, health_handler, not_found_handler, readiness_handler, redirect_handler,
    shorten_handler,
};
use crate::api::middleware::tracing;
use crate::api::routes::{Endpoint, RouteTable};
use crate::state::AppState;
use axum::Router;
use axum::routing::{MethodRouter, get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// `/shorten/` and `/shorten` reach the same handler; `/analytics/` becomes
/// `/analytics` and is treated as a short code.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router_from_table(&RouteTable::standard(), endpoint_handler)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Registers every route of `table`, in precedence order, with the handler
/// `handler` returns for its endpoint.
pub fn router_from_table<S, F>(table: &RouteTable, handler: F) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(Endpoint) -> MethodRouter<S>,
{
    table
        .routes()
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(&route.pattern.axum_path(), handler(route.endpoint))
        })
}

fn endpoint_handler(endpoint: Endpoint) -> MethodRouter<AppState> {
    match endpoint {
        Endpoint::Shorten => post(shorten_handler),
        Endpoint::Health => get(health_handler),
        Endpoint::Readiness => get(readiness_handler),
        Endpoint::Analytics => get(analytics_handler),
        Endpoint::Redirect => get(redirect_handler),
    }
}
