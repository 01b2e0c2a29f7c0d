//! Conversion of stored URLs into `Location` header values.
//!
//! URLs are stored verbatim, so a target may contain bytes a header cannot
//! carry. CR and LF become spaces; any other ASCII control character except
//! tab is percent-encoded. Non-ASCII text passes through unchanged.

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use std::borrow::Cow;

/// Rewrites `url` so that it is a valid header value.
pub fn sanitize_location(url: &str) -> Cow<'_, str> {
    if !url.chars().any(needs_rewrite) {
        return Cow::Borrowed(url);
    }

    let mut out = String::with_capacity(url.len() + 8);
    for c in url.chars() {
        match c {
            '\r' | '\n' => out.push(' '),
            c if needs_rewrite(c) => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Builds the `Location` header for a redirect to `url`.
pub fn location_header(url: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::try_from(sanitize_location(url).as_ref())
}

fn needs_rewrite(c: char) -> bool {
    c.is_ascii_control() && c != '\t'
}
