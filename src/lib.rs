// src/lib.rs
// =============================================================================
// wordcrawl library: the crawl core used by the CLI in main.rs.
//
// Modules, leaves first:
// - rules: per-domain content selector and link pattern
// - extract: main-content element and its visible text
// - links: same-site link discovery and pattern filtering
// - words: token cleaning, stop words, word counts
// - crawl: fetching and the depth-by-depth crawl loop
// - output: CSV files
// - config, prompt, cli, error: the application around the core
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod links;
pub mod output;
pub mod prompt;
pub mod rules;
pub mod words;
