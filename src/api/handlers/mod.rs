//! HTTP request handlers.
//!
//! Each handler module corresponds to one endpoint of the route table.

pub mod analytics;
pub mod fallback;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use fallback::not_found_handler;
pub use health::{health_handler, readiness_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
