//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Redis
//!
//! ```bash
//! # Either a full URL...
//! export REDIS_URL="redis://:secret@localhost:6379/0"
//!
//! # ...or an address plus optional components
//! export REDIS_ADDR="localhost:6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! `REDIS_URL` takes priority. Without either, `localhost:6379` is used.
//!
//! ## Optional Variables
//!
//! - `BASE_URL` - Public prefix of short URLs (default: `http://localhost:8080`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `STORE_BACKEND` - `redis` or `memory` (default: `redis`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `CLICK_WORKER_CONCURRENCY` - Parallel click increments (default: 4)
//! - `REDIS_CONNECT_TIMEOUT` - Seconds to wait for the initial connection (default: 5)
//! - `REDIS_COMMAND_TIMEOUT` - Seconds to wait for a single command (default: 3)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REDIS_ADDR: &str = "localhost:6379";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Which [`crate::domain::repositories::LinkStore`] implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => f.write_str("redis"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub base_url: String,
    pub listen_addr: String,
    pub store_backend: StoreBackend,
    pub log_level: String,
    pub log_format: String,
    pub click_queue_capacity: usize,
    /// Maximum number of click increments the background worker runs at once.
    pub click_worker_concurrency: usize,
    /// Seconds allowed for establishing the Redis connection.
    pub redis_connect_timeout: u64,
    /// Seconds allowed for each Redis command, including detached click increments.
    pub redis_command_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let store_backend = env::var("STORE_BACKEND")
            .ok()
            .map(|v| v.parse::<StoreBackend>())
            .transpose()
            .context("Failed to load store configuration")?
            .unwrap_or(StoreBackend::Redis);

        Ok(Self {
            redis_url,
            base_url,
            listen_addr,
            store_backend,
            log_level,
            log_format,
            click_queue_capacity: parse_or("CLICK_QUEUE_CAPACITY", 10_000),
            click_worker_concurrency: parse_or("CLICK_WORKER_CONCURRENCY", 4),
            redis_connect_timeout: parse_or("REDIS_CONNECT_TIMEOUT", 5),
            redis_command_timeout: parse_or("REDIS_COMMAND_TIMEOUT", 3),
        })
    }

    /// Loads the Redis URL.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_ADDR`, `REDIS_PASSWORD`, `REDIS_DB`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let addr = env::var("REDIS_ADDR").unwrap_or_else(|_| DEFAULT_REDIS_ADDR.to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        // Empty password means no authentication
        match env::var("REDIS_PASSWORD") {
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}/{}", pwd, addr, db),
            _ => format!("redis://{}/{}", addr, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `click_queue_capacity` is outside 100..=1_000_000
    /// - `click_worker_concurrency` is outside 1..=256
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - `base_url` is not an absolute http(s) URL
    /// - `redis_url` has the wrong scheme (Redis backend only)
    /// - a timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.click_queue_capacity < 100 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be at least 100, got {}",
                self.click_queue_capacity
            );
        }

        if self.click_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.click_queue_capacity
            );
        }

        if self.click_worker_concurrency == 0 || self.click_worker_concurrency > 256 {
            anyhow::bail!(
                "CLICK_WORKER_CONCURRENCY must be between 1 and 256, got {}",
                self.click_worker_concurrency
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base = url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.store_backend == StoreBackend::Redis
            && !self.redis_url.starts_with("redis://")
            && !self.redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if self.redis_connect_timeout == 0 {
            anyhow::bail!("REDIS_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.redis_command_timeout == 0 {
            anyhow::bail!("REDIS_COMMAND_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_connect_timeout)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_command_timeout)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        match self.store_backend {
            StoreBackend::Redis => tracing::info!(
                "  Store: Redis at {}",
                mask_connection_string(&self.redis_url)
            ),
            StoreBackend::Memory => tracing::info!("  Store: in-memory (not persistent)"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Click queue: capacity {}, concurrency {}",
            self.click_queue_capacity,
            self.click_worker_concurrency
        );
    }
}

fn parse_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let rest = &url[start + 3..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "REDIS_URL",
        "REDIS_ADDR",
        "REDIS_PASSWORD",
        "REDIS_DB",
        "BASE_URL",
        "LISTEN",
        "STORE_BACKEND",
        "CLICK_QUEUE_CAPACITY",
    ];

    fn clear_env() {
        // SAFETY: callers are #[serial], so no concurrent access
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            redis_url: "redis://localhost:6379/0".to_string(),
            base_url: "http://localhost:8080".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            store_backend: StoreBackend::Redis,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            click_queue_capacity: 10_000,
            click_worker_concurrency: 4,
            redis_connect_timeout: 5,
            redis_command_timeout: 3,
        }
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );

        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.click_queue_capacity = 50;
        assert!(config.validate().is_err());
        config.click_queue_capacity = 10_000;

        config.click_worker_concurrency = 0;
        assert!(config.validate().is_err());
        config.click_worker_concurrency = 4;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:8080".to_string();

        config.base_url = "localhost:8080".to_string();
        assert!(config.validate().is_err());
        config.base_url = "ftp://files.example.com".to_string();
        assert!(config.validate().is_err());
        config.base_url = "https://s.example.com".to_string();

        config.redis_url = "memcached://localhost".to_string();
        assert!(config.validate().is_err());

        config.store_backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());

        config.redis_command_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!("MEMORY".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.redis_url, "redis://localhost:6379/0");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.store_backend, StoreBackend::Redis);
        assert_eq!(config.click_queue_capacity, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("REDIS_ADDR", "redis-host:6380");
            env::set_var("REDIS_DB", "1");
        }

        assert_eq!(Config::load_redis_url(), "redis://redis-host:6380/1");

        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        assert_eq!(Config::load_redis_url(), "redis://:secret@redis-host:6380/1");

        // Empty password is treated as no password
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        assert_eq!(Config::load_redis_url(), "redis://redis-host:6380/1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_ADDR", "from-components:6379");
        }

        let url = Config::load_redis_url();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_backend_is_rejected() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("STORE_BACKEND", "sqlite");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_numbers_fall_back_to_defaults() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("CLICK_QUEUE_CAPACITY", "lots");
        }

        assert_eq!(Config::from_env().unwrap().click_queue_capacity, 10_000);

        clear_env();
    }
}
