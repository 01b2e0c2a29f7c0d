//! Click event model for asynchronous click counting.

/// A redirect that should be counted.
///
/// Created by [`crate::application::services::ClickTracker`] when a redirect
/// resolves, queued without waiting, and consumed by
/// [`crate::domain::click_worker::run_click_worker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
