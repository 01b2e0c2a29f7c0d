//! Application layer services implementing business logic.
//!
//! Services compose the domain contracts into the operations exposed over
//! HTTP. Handlers call services; services call the store.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shorten, redirect and analytics
//! - [`services::click_tracker::ClickTracker`] - Non-blocking click queue

pub mod services;
