// src/rules/mod.rs
// =============================================================================
// This module holds the per-domain crawl rules.
//
// A rule tells the crawler two things about a site:
// - where the "main content" of a page lives (a tag + class pair)
// - which local links are worth following (a regular expression)
//
// Sites without a rule still work: the whole <body> is used as content and
// a generic one-segment path pattern decides which links to follow.
// =============================================================================

mod registry;

pub use registry::{ContentSelector, DomainRule, RuleRegistry, RuleSpec, FALLBACK_LINK_PATTERN};
