//! Link store backends.
//!
//! Implementations of [`crate::domain::repositories::LinkStore`]:
//! - [`RedisStore`] - production backend using Redis `SET`/`GET`/`INCR`
//! - [`MemoryStore`] - in-process backend for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
