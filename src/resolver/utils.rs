//! Shared URL helpers for resolver and extractor code.

use regex::Regex;
use url::Url;

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Joins a base URL and a path segment with exactly one `/` between them.
///
/// Only the boundary is touched; separators inside `segment` are kept as-is.
#[must_use]
pub fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

/// Returns `host[:port]` for a URL, or an empty string for host-less URLs.
///
/// The port is only present when it differs from the scheme default.
#[must_use]
pub fn url_authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
