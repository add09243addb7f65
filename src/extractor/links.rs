//! Link filtering and normalization rules.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::resolver::utils::{compile_static_regex, join_url, url_authority};

/// Suffixes accepted by the DOM-query filter.
const DOCUMENT_SUFFIXES: &[&str] = &[".pdf", ".doc", ".docx"];

/// Comments and elements whose content is not markup: anchors inside them are
/// text, not elements.
static NON_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"(?is)<!--.*?(?:-->|\z)|<script\b.*?(?:</script\s*>|\z)|<style\b.*?(?:</style\s*>|\z)|<textarea\b.*?(?:</textarea\s*>|\z)|<template\b.*?(?:</template\s*>|\z)|<noscript\b.*?(?:</noscript\s*>|\z)",
    )
});
static ANCHOR_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<a(?:\s[^>]*)?>"));
static HREF_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)\shref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
});

/// Returns true if `href` looks like a supplementary document link.
///
/// Case-insensitive substring test: `.pdf` or `.doc` anywhere (including query
/// strings and fragments), and no `mailto`.
#[must_use]
pub fn is_valid_link(href: &str) -> bool {
    let lower = href.to_lowercase();
    (lower.contains(".pdf") || lower.contains(".doc")) && !lower.contains("mailto")
}

/// Returns true if a renderer-resolved URL points straight at a document.
///
/// The URL must have no query component and its path must end in `.pdf`,
/// `.doc` or `.docx` (case-insensitive).
#[must_use]
pub fn is_document_url(href: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    if url.query().is_some() {
        return false;
    }
    let path = url.path().to_ascii_lowercase();
    DOCUMENT_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Makes a raw `href` absolute against the page's final URL.
///
/// - `http…` hrefs are returned unchanged.
/// - `//host/path` hrefs take the page's scheme.
/// - Anything else is treated as relative to the host root:
///   `{scheme}://{host}/{href}` with a single separator at the boundary.
#[must_use]
pub fn normalize_href(href: &str, final_url: &Url) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    if href.starts_with("//") {
        return format!("{}:{href}", final_url.scheme());
    }
    let origin = format!("{}://{}", final_url.scheme(), url_authority(final_url));
    join_url(&origin, href)
}

/// Collects raw `href` attribute values of all `<a>` elements in `html`.
///
/// Anchors without an `href` are skipped, as is anything inside comments or
/// `script`, `style`, `textarea`, `template` and `noscript` elements. Basic
/// HTML entities are decoded.
#[must_use]
pub fn collect_anchor_hrefs(html: &str) -> Vec<String> {
    let markup = NON_MARKUP_RE.replace_all(html, " ");
    ANCHOR_TAG_RE
        .find_iter(&markup)
        .filter_map(|tag| {
            HREF_ATTR_RE.captures(tag.as_str()).map(|caps| {
                let value = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map_or("", |m| m.as_str());
                html_unescape_basic(value.trim())
            })
        })
        .collect()
}

fn html_unescape_basic(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
