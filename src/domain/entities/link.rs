//! Link entity returned when a URL is shortened.

/// A freshly created short link.
///
/// `short_url` is the caller-facing address: the configured base URL joined
/// with `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub long_url: String,
    pub short_url: String,
}

impl ShortenedLink {
    /// Creates a link, joining `base_url` and `code` with exactly one slash.
    pub fn new(code: String, long_url: String, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), code);
        Self {
            code,
            long_url,
            short_url,
        }
    }
}
