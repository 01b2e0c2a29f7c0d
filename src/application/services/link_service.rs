//! Link creation, resolution and click analytics.

use std::sync::Arc;

use axum::http::HeaderValue;
use serde_json::json;
use tracing::{debug, warn};

use crate::application::services::ClickTracker;
use crate::domain::entities::ShortenedLink;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::location::location_header;

/// Service behind the shorten, redirect and analytics endpoints.
///
/// Holds no per-request state: the store owns all persisted data, the
/// generator owns its RNG, and clicks are handed to the background worker
/// through the [`ClickTracker`].
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    clicks: ClickTracker,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of every short URL; a trailing slash
    /// is ignored.
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn CodeGenerator>,
        clicks: ClickTracker,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            clicks,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// A fresh code is generated for every call and written without checking
    /// for an existing mapping; if the code is already taken, the previous
    /// mapping is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty. Nothing is
    /// generated or written in that case.
    ///
    /// Returns [`AppError::Internal`] if the store rejects the write.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenedLink, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "URL is required",
                json!({ "field": "url" }),
            ));
        }

        let code = self.generator.generate();
        self.store.save_url(&code, long_url).await?;

        debug!("Shortened {} -> {}", code, long_url);

        Ok(ShortenedLink::new(code, long_url.to_string(), &self.base_url))
    }

    /// Resolves `code` to the `Location` of its redirect and counts the visit.
    ///
    /// The stored URL is made header-safe first (see
    /// [`crate::utils::location`]), and the click is queued only once the
    /// header exists. The click is not awaited. Queue or counter failures are
    /// logged and never change the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown; no click is
    /// recorded.
    ///
    /// Returns [`AppError::Internal`] if the store lookup fails or the target
    /// cannot be expressed as a header; no click is recorded.
    pub async fn resolve(&self, code: &str) -> Result<HeaderValue, AppError> {
        let long_url = self.lookup(code).await?;

        let location = location_header(&long_url).map_err(|_| {
            AppError::internal(
                "Stored URL is not a valid redirect target",
                json!({ "code": code }),
            )
        })?;

        if let Err(e) = self.clicks.track(code) {
            warn!("Click for {} not recorded: {}", code, e);
        }

        Ok(location)
    }

    /// Resolves `code` without counting a click.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn lookup(&self, code: &str) -> Result<String, AppError> {
        self.store.get_url(code).await?.ok_or_else(|| {
            debug!("Unknown short code: {}", code);
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Returns the number of recorded clicks for `code`.
    ///
    /// Codes that were never clicked (or never created) report 0.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn clicks(&self, code: &str) -> Result<i64, AppError> {
        Ok(self.store.get_clicks(code).await?)
    }

    /// Access to the click queue, for health reporting.
    pub fn click_tracker(&self) -> &ClickTracker {
        &self.clicks
    }

    /// Access to the store, for health reporting.
    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }
}
