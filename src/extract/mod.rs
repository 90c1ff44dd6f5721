// src/extract/mod.rs
// =============================================================================
// This module finds the "main content" of a page and turns it into words.
//
// Submodules:
// - content: picks the content element (per-domain rule or <body>) and
//   collects its visible text
// =============================================================================

mod content;

pub use content::{extract_content, text_tokens};
