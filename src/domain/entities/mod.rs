//! Core domain entities.
//!
//! - [`ShortenedLink`] - the result of shortening a URL

pub mod link;

pub use link::ShortenedLink;
