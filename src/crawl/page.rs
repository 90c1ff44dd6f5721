// src/crawl/page.rs
// =============================================================================
// What the crawler learns from one page.
//
// Given the HTML of a page:
// 1. parse it
// 2. find the content element for the page's domain
// 3. collect the local links inside it that match the domain's pattern
// 4. clean the words inside it
//
// A page without its content element yields no words and no links.
// =============================================================================

use std::collections::BTreeSet;

use log::debug;
use scraper::Html;

use crate::extract::{extract_content, text_tokens};
use crate::links::{discover_paths, netloc, LinkMode};
use crate::rules::RuleRegistry;
use crate::words::WordFilter;

/// Links and words found on one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub source_url: String,
    /// Local paths only, e.g. "/blog/a-1/"
    pub discovered_paths: BTreeSet<String>,
    pub words: Vec<String>,
}

pub fn process_page(
    url: &str,
    html: &str,
    registry: &RuleRegistry,
    filter: &WordFilter,
) -> PageResult {
    let document = Html::parse_document(html);
    let domain = netloc(url);

    let Some(region) = extract_content(&document, registry, &domain) else {
        debug!("No content element on {}", url);
        return PageResult {
            source_url: url.to_string(),
            ..PageResult::default()
        };
    };

    PageResult {
        source_url: url.to_string(),
        discovered_paths: discover_paths(
            region,
            url,
            registry.link_pattern(&domain),
            LinkMode::Pattern,
        ),
        words: filter.clean(text_tokens(region)),
    }
}

/// Local paths linked from the content of one page, in either mode.
pub fn page_links(url: &str, html: &str, registry: &RuleRegistry, mode: LinkMode) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let domain = netloc(url);

    extract_content(&document, registry, &domain)
        .map(|region| discover_paths(region, url, registry.link_pattern(&domain), mode))
        .unwrap_or_default()
}
