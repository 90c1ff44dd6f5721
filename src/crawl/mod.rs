// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling, one depth level at a time
// - Same-domain links only, filtered by the domain's link pattern
// - Configurable depth limit
// - Every URL fetched at most once per crawl
//
// Submodules:
// - fetch: the Fetcher trait and the reqwest implementation
// - page: content, links and words of one page
// - driver: the depth loop that ties it all together
// =============================================================================

mod driver;
mod fetch;
mod page;

pub use driver::{CrawlOutput, CrawlStats, Crawler};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use page::{page_links, process_page, PageResult};
