// src/links/discover.rs
// =============================================================================
// Link discovery.
//
// How an href is classified:
// 1. Absolute URL on the same host as the page -> keep its path (decoded)
// 2. Root-relative path ("/blog/post/")        -> keep it as written
// 3. Anything else (other hosts, "post.html", "mailto:...") -> discard
//
// Pattern mode then keeps only the paths whose beginning matches the
// domain's link pattern. The result is a set, so duplicates disappear.
//
// Rust concepts:
// - BTreeSet: ordered set, so results print and iterate deterministically
// - Url: parsing hrefs and comparing hosts
// =============================================================================

use std::collections::BTreeSet;

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

/// Which local links to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Every same-site path
    All,
    /// Same-site paths matching the domain's link pattern
    Pattern,
}

// Collects the local paths linked from `region`
//
// Parameters:
//   region: content element of the page (links outside it are ignored)
//   origin_url: URL of the page, used for the same-host check
//   pattern: the domain's link pattern (only used in LinkMode::Pattern)
//   mode: LinkMode::All or LinkMode::Pattern
//
// Example:
//   origin_url = "http://example.test/blog"
//   hrefs = ["/blog/a-1/", "http://example.test/blog/a-2/", "https://other.test/x"]
//   pattern = ^/blog/[\w-]+/$
//   result = {"/blog/a-1/", "/blog/a-2/"}
pub fn discover_paths(
    region: ElementRef<'_>,
    origin_url: &str,
    pattern: &Regex,
    mode: LinkMode,
) -> BTreeSet<String> {
    let origin_host = netloc(origin_url);

    // "a[href]" is a constant selector
    let selector = Selector::parse("a[href]").expect("anchor selector is valid");

    region
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| local_path(href, &origin_host))
        .filter(|path| match mode {
            LinkMode::All => true,
            LinkMode::Pattern => matches_prefix(pattern, path),
        })
        .collect()
}

// Maps an href to a local path, or None for links leaving the site
fn local_path(href: &str, origin_host: &str) -> Option<String> {
    let href_host = netloc(href);

    if !href_host.is_empty() && href_host == origin_host {
        absolute(href).map(|url| decode_path(url.path()))
    } else if href_host.is_empty() && href.starts_with('/') {
        Some(href.to_string())
    } else {
        None
    }
}

// Url::path() percent-encodes non-ASCII ("/blog/ñ/" -> "/blog/%C3%B1/").
// Decode it so the pattern sees the same text as a root-relative href.
fn decode_path(path: &str) -> String {
    urlencoding::decode(path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Host (plus explicit port) of `url`, or "" when it has none.
///
/// Relative references like "/about" or "post.html" have no host.
/// Protocol-relative references ("//host/path") do.
pub fn netloc(url: &str) -> String {
    let Some(parsed) = absolute(url) else {
        return String::new();
    };

    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

// Parses absolute and protocol-relative URLs; relative paths give None
fn absolute(href: &str) -> Option<Url> {
    if let Some(rest) = href.strip_prefix("//") {
        return Url::parse(&format!("http://{}", rest)).ok();
    }
    Url::parse(href).ok()
}

/// True when the beginning of `path` matches `pattern`.
///
/// The pattern is not required to consume the whole path, only to match
/// starting at its first character.
pub fn matches_prefix(pattern: &Regex, path: &str) -> bool {
    pattern
        .find(path)
        .map(|found| found.start() == 0)
        .unwrap_or(false)
}

/// Canonical form of an absolute URL, or None when it has no host.
///
/// The host is lowercased, a default port is dropped and the path is
/// percent-encoded, so two spellings of one page compare equal.
///   "HTTP://Example.Test:80/blog" -> "http://example.test/blog"
pub fn canonical_url(url: &str) -> Option<String> {
    let parsed = absolute(url)?;
    parsed.host_str().filter(|host| !host.is_empty())?;
    Some(parsed.to_string())
}

/// Turns a local path into an absolute URL on the origin's site.
///
/// The origin's scheme and host are reused, so `https` seeds stay on `https`.
/// The result is in canonical form (see `canonical_url`).
pub fn resolve_path(origin_url: &str, path: &str) -> Option<String> {
    let origin = absolute(origin_url)?;
    origin.host_str().filter(|host| !host.is_empty())?;
    origin.join(path).ok().map(|url| url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a prefix match instead of is_match()?
//    - Regex::is_match finds the pattern anywhere in the path
//    - A link pattern describes how a path starts, so "/en/blog/x" must not
//      pass a "/blog/..." pattern
//    - find() returns the leftmost match; if any match starts at 0, that one
//      does, so checking start() == 0 is enough
//
// 2. What is filter_map?
//    - map + filter in one step
//    - The closure returns Option<T>; None items are dropped
//
// 3. Why does netloc() return String and not Option<String>?
//    - "no host" and "empty host" mean the same thing here
//    - An empty string compares unequal to every real host
// -----------------------------------------------------------------------------
