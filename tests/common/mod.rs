#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use redis_shortener::application::services::{ClickTracker, LinkService};
use redis_shortener::domain::click_event::ClickEvent;
use redis_shortener::domain::click_worker::run_click_worker;
use redis_shortener::domain::repositories::{LinkStore, StoreError, StoreResult};
use redis_shortener::infrastructure::store::MemoryStore;
use redis_shortener::routes::app_router;
use redis_shortener::state::AppState;
use redis_shortener::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const BASE_URL: &str = "http://short.test";

/// Hands out a fixed sequence of codes, then repeats the last one.
pub struct FixedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl FixedCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(codes.last().copied().unwrap_or("aaaaaa").to_string()),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        match self.codes.lock().unwrap().pop_front() {
            Some(code) => {
                *self.last.lock().unwrap() = code.clone();
                code
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Store whose every command fails as if the backend were down.
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn save_url(&self, _code: &str, _url: &str) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn get_url(&self, _code: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn increment_clicks(&self, _code: &str) -> StoreResult<i64> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn get_clicks(&self, _code: &str) -> StoreResult<i64> {
        Err(StoreError::Connection("connection refused".into()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".into()))
    }
}

/// State backed by a fresh [`MemoryStore`] with a running click worker.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    create_test_state_with_generator(Arc::new(RandomCodeGenerator::with_seed(7)))
}

pub fn create_test_state_with_generator(
    generator: Arc<dyn CodeGenerator>,
) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(run_click_worker(rx, store.clone(), 4));

    (build_state(store.clone(), generator, tx), store)
}

/// State without a worker; the caller inspects the click queue directly.
pub fn create_test_state_with_queue(
    store: Arc<dyn LinkStore>,
    capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    let state = build_state(store, Arc::new(RandomCodeGenerator::with_seed(7)), tx);
    (state, rx)
}

fn build_state(
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    tx: mpsc::Sender<ClickEvent>,
) -> AppState {
    let link_service = LinkService::new(store, generator, ClickTracker::new(tx), BASE_URL);
    AppState::new(Arc::new(link_service))
}

/// Serves the same router stack as production, path normalization included.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

/// Polls the store until `code` reaches `expected` clicks or two seconds pass.
pub async fn wait_for_clicks(store: &MemoryStore, code: &str, expected: i64) -> i64 {
    let mut clicks = 0;
    for _ in 0..200 {
        clicks = store.get_clicks(code).await.unwrap();
        if clicks >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    clicks
}
