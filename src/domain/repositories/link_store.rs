//! Store trait for short link mappings and click counters.

use async_trait::async_trait;
use std::time::Duration;

/// Key prefix for `code -> original URL` mappings.
pub const URL_KEY_PREFIX: &str = "url:";

/// Key prefix for per-code click counters.
pub const CLICKS_KEY_PREFIX: &str = "analytics:";

/// Builds the mapping key for a short code (`url:<code>`).
pub fn url_key(code: &str) -> String {
    format!("{URL_KEY_PREFIX}{code}")
}

/// Builds the counter key for a short code (`analytics:<code>`).
///
/// Counters live in their own namespace so a code can accumulate clicks
/// with or without a mapping, and the two value kinds never collide.
pub fn clicks_key(code: &str) -> String {
    format!("{CLICKS_KEY_PREFIX}{code}")
}

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command failed: {0}")]
    Command(String),

    #[error("store command timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent mapping store with an independent atomic click counter.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis backend (`SET`/`GET`/`INCR`)
/// - [`crate::infrastructure::store::MemoryStore`] - in-process backend for development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Stores `url` under `code`, replacing any previous mapping.
    ///
    /// Entries never expire.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unreachable or rejects the write.
    async fn save_url(&self, code: &str, url: &str) -> StoreResult<()>;

    /// Looks up the original URL for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if a mapping exists
    /// - `Ok(None)` if the code is unknown
    async fn get_url(&self, code: &str) -> StoreResult<Option<String>>;

    /// Atomically increments the click counter for `code` and returns the new value.
    ///
    /// A missing counter is created at 1. Implementations must rely on an
    /// atomic primitive; concurrent increments for the same code never lose
    /// updates.
    async fn increment_clicks(&self, code: &str) -> StoreResult<i64>;

    /// Returns the click counter for `code`, or 0 if it was never incremented.
    async fn get_clicks(&self, code: &str) -> StoreResult<i64>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
