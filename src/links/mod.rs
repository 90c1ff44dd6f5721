// src/links/mod.rs
// =============================================================================
// This module decides which links on a page belong to the crawl.
//
// Submodules:
// - discover: collects hrefs from a content region, keeps the ones that
//   point at the same site, and (in pattern mode) the ones whose path
//   matches the domain's link pattern
// =============================================================================

mod discover;

pub use discover::{
    canonical_url, discover_paths, matches_prefix, netloc, resolve_path, LinkMode,
};
