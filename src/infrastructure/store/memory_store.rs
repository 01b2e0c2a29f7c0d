//! In-process link store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

use crate::domain::repositories::{LinkStore, StoreResult};

/// Link store that keeps everything in process memory.
///
/// Used when `STORE_BACKEND=memory` and as the backend of the HTTP tests.
/// Contents are lost when the process exits. Counter increments happen
/// while holding the counter lock, which makes them atomic.
#[derive(Default)]
pub struct MemoryStore {
    urls: RwLock<HashMap<String, String>>,
    clicks: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn save_url(&self, code: &str, url: &str) -> StoreResult<()> {
        self.urls
            .write()
            .await
            .insert(code.to_string(), url.to_string());
        Ok(())
    }

    async fn get_url(&self, code: &str) -> StoreResult<Option<String>> {
        Ok(self.urls.read().await.get(code).cloned())
    }

    async fn increment_clicks(&self, code: &str) -> StoreResult<i64> {
        let mut clicks = self.clicks.lock().await;
        let counter = clicks.entry(code.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn get_clicks(&self, code: &str) -> StoreResult<i64> {
        Ok(self.clicks.lock().await.get(code).copied().unwrap_or(0))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
