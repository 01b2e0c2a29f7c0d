//! # Redis Shortener
//!
//! A URL shortening service with per-code click counting, built with Axum
//! and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the [`domain::repositories::LinkStore`] contract, click worker
//! - **Application Layer** ([`application`]) - [`application::services::LinkService`] and the click queue
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - Route table, handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 6-character alphanumeric codes
//! - `302` redirects with asynchronous, best-effort click counting
//! - Atomic counters via Redis `INCR`
//! - Graceful shutdown that drains pending click increments
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_ADDR="localhost:6379"
//! export BASE_URL="http://localhost:8080"
//!
//! cargo run
//!
//! curl -X POST localhost:8080/shorten -d '{"url":"https://example.com"}' \
//!      -H 'content-type: application/json'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ClickTracker, LinkService};
    pub use crate::domain::entities::ShortenedLink;
    pub use crate::domain::repositories::{LinkStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
}
