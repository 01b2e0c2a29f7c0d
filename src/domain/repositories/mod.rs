//! Storage trait definitions for the domain layer.
//!
//! The domain talks to persistence only through [`LinkStore`]. Concrete
//! backends live in `crate::infrastructure::store`.
//!
//! # Key Space
//!
//! - `url:<code>` - original URL for a short code
//! - `analytics:<code>` - click counter for a short code

pub mod link_store;

pub use link_store::{
    CLICKS_KEY_PREFIX, LinkStore, StoreError, StoreResult, URL_KEY_PREFIX, clicks_key, url_key,
};

#[cfg(test)]
pub use link_store::MockLinkStore;
