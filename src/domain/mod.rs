//! Domain layer: entities, the storage contract, and click processing.
//!
//! # Architecture
//!
//! - [`entities`] - Short link data structures
//! - [`repositories`] - The [`repositories::LinkStore`] contract
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Store implementations live in [`crate::infrastructure`].
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves a short code
//! 2. A [`click_event::ClickEvent`] is queued on a bounded channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] increments the counter in the store

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
