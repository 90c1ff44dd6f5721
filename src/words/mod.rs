// src/words/mod.rs
// =============================================================================
// This module turns page text into countable words.
//
// Submodules:
// - filter: token cleaning and stop-word removal
// - stopwords: the noise list and per-language stop-word lists
// - tally: word -> count aggregation for the whole crawl
// =============================================================================

mod filter;
mod stopwords;
mod tally;

pub use filter::{clean_word, WordFilter};
pub use stopwords::Language;
pub use tally::{WordCount, WordTally};
