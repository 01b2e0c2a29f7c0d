//! Non-blocking hand-off of click events to the background worker.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::click_event::ClickEvent;

/// Why a click could not be queued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClickDispatchError {
    /// The queue is at capacity; the event was dropped.
    #[error("click queue is full")]
    QueueFull,

    /// The worker has stopped and no longer receives events.
    #[error("click worker is not running")]
    WorkerStopped,
}

/// Sending half of the click queue.
///
/// [`ClickTracker::track`] never waits: the queue is bounded and a full queue
/// drops the event instead of slowing down the redirect.
#[derive(Clone)]
pub struct ClickTracker {
    sender: mpsc::Sender<ClickEvent>,
}

impl ClickTracker {
    pub fn new(sender: mpsc::Sender<ClickEvent>) -> Self {
        Self { sender }
    }

    /// Queues a click for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`ClickDispatchError::QueueFull`] when the queue is at capacity
    /// and [`ClickDispatchError::WorkerStopped`] when the worker is gone.
    pub fn track(&self, code: &str) -> Result<(), ClickDispatchError> {
        self.sender
            .try_send(ClickEvent::new(code))
            .map_err(|e| match e {
                TrySendError::Full(_) => ClickDispatchError::QueueFull,
                TrySendError::Closed(_) => ClickDispatchError::WorkerStopped,
            })
    }

    /// Returns false once the worker has stopped receiving.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Free slots currently left in the queue.
    pub fn available_capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Total queue size.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}
