//! Business logic services for the application layer.

pub mod click_tracker;
pub mod link_service;

pub use click_tracker::{ClickDispatchError, ClickTracker};
pub use link_service::LinkService;
