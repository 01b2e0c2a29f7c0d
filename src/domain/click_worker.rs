//! Background worker that applies queued click increments.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkStore;

/// Consumes click events and increments the matching counters.
///
/// At most `concurrency` increments run at once. A failed increment is
/// logged and dropped; it is never reported back to the redirect that
/// produced it.
///
/// The worker returns once every sender is dropped and all in-flight
/// increments have finished, so shutting down the HTTP server never
/// cancels a started increment.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    store: Arc<dyn LinkStore>,
    concurrency: usize,
) {
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };
        let store = store.clone();

        in_flight.spawn(async move {
            let _permit = permit;
            match store.increment_clicks(&event.code).await {
                Ok(total) => debug!("Click recorded: {} (total {})", event.code, total),
                Err(e) => warn!("Failed to record click for {}: {}", event.code, e),
            }
        });

        while in_flight.try_join_next().is_some() {}
    }

    let pending = in_flight.len();
    if pending > 0 {
        info!("Click queue closed, waiting for {} pending increments", pending);
    }
    while in_flight.join_next().await.is_some() {}

    info!("Click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkStore, StoreError};
    use crate::infrastructure::store::MemoryStore;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let store = Arc::new(MemoryStore::new());
        let (tx, rx) = mpsc::channel(16);

        let worker = tokio::spawn(run_click_worker(rx, store.clone(), 4));

        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        tx.send(ClickEvent::new("other1")).await.unwrap();
        drop(tx);

        worker.await.unwrap();

        assert_eq!(store.get_clicks("abc123").await.unwrap(), 3);
        assert_eq!(store.get_clicks("other1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_worker_swallows_store_failures() {
        let mut store = MockLinkStore::new();
        store
            .expect_increment_clicks()
            .times(2)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(store), 1));

        tx.send(ClickEvent::new("a")).await.unwrap();
        tx.send(ClickEvent::new("b")).await.unwrap();
        drop(tx);

        assert!(worker.await.is_ok());
    }

    #[tokio::test]
    async fn test_worker_drains_queue_after_senders_drop() {
        let store = Arc::new(MemoryStore::new());
        let (tx, rx) = mpsc::channel(128);

        for _ in 0..100 {
            tx.try_send(ClickEvent::new("drain1")).unwrap();
        }
        drop(tx);

        run_click_worker(rx, store.clone(), 8).await;

        assert_eq!(store.get_clicks("drain1").await.unwrap(), 100);
    }
}
