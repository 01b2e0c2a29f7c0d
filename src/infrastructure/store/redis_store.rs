//! Redis-backed link store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::repositories::{
    LinkStore, StoreError, StoreResult, clicks_key, url_key,
};

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        if e.is_connection_dropped() || e.is_connection_refusal() || e.is_io_error() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

/// Link store on top of Redis.
///
/// Mappings are plain `SET url:<code> <url>` entries without expiry and
/// counters are advanced with `INCR analytics:<code>`, so increments stay
/// atomic across any number of service instances.
///
/// Uses `ConnectionManager`, which multiplexes one connection and reconnects
/// after failures. Each command is bounded by `command_timeout`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    command_timeout: Duration,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `connect_timeout` - upper bound for establishing the connection
    /// - `command_timeout` - upper bound for every subsequent command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the server
    /// cannot be reached, and [`StoreError::Timeout`] if connecting takes
    /// longer than `connect_timeout`.
    pub async fn connect(
        redis_url: &str,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> StoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(connect_timeout))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            conn: manager,
            command_timeout,
        };
        store.ping().await?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    async fn bounded<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        match tokio::time::timeout(self.command_timeout, op).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.command_timeout)),
        }
    }
}

#[async_trait]
impl LinkStore for RedisStore {
    async fn save_url(&self, code: &str, url: &str) -> StoreResult<()> {
        let key = url_key(code);
        let mut conn = self.conn.clone();

        self.bounded(conn.set::<_, _, ()>(&key, url)).await?;
        debug!("SET {} -> {}", key, url);
        Ok(())
    }

    async fn get_url(&self, code: &str) -> StoreResult<Option<String>> {
        let key = url_key(code);
        let mut conn = self.conn.clone();

        let url = self.bounded(conn.get::<_, Option<String>>(&key)).await?;
        match &url {
            Some(url) => debug!("HIT {} -> {}", key, url),
            None => debug!("MISS {}", key),
        }
        Ok(url)
    }

    async fn increment_clicks(&self, code: &str) -> StoreResult<i64> {
        let key = clicks_key(code);
        let mut conn = self.conn.clone();

        self.bounded(conn.incr::<_, _, i64>(&key, 1)).await
    }

    async fn get_clicks(&self, code: &str) -> StoreResult<i64> {
        let key = clicks_key(code);
        let mut conn = self.conn.clone();

        let clicks = self.bounded(conn.get::<_, Option<i64>>(&key)).await?;
        Ok(clicks.unwrap_or(0))
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        self.bounded(conn.ping::<()>()).await
    }
}
