// src/words/tally.rs
// =============================================================================
// Word counting.
//
// The crawl collects one long list of cleaned words. WordTally turns it into
// word -> count once, at the end of the crawl.
// =============================================================================

use std::collections::HashMap;

use serde::Serialize;

/// One row of the word summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Occurrence count per word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTally {
    counts: HashMap<String, usize>,
}

impl WordTally {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = HashMap::new();
        for word in words {
            *counts.entry(word.as_ref().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent words, highest count first.
    ///
    /// Ties are broken alphabetically so the output is stable.
    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut rows = self.sorted();
        rows.truncate(n);
        rows
    }

    /// Every word, highest count first.
    pub fn sorted(&self) -> Vec<WordCount> {
        let mut rows: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        rows
    }
}
