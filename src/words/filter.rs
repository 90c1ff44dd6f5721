// src/words/filter.rs
// =============================================================================
// Word cleaning.
//
// Each raw token from the page text goes through:
// 1. lowercase
// 2. punctuation (! ? . , : ; ( ) - —) replaced by spaces, then trimmed
// 3. wrapping symbols (# « ») stripped from both ends
// 4. dropped if empty or a stop word
//
// Tokens are handled one at a time and keep their order. Duplicates stay,
// counting happens later in WordTally.
// =============================================================================

use std::collections::HashSet;

use super::stopwords::{Language, NOISE_WORDS};

const PUNCTUATION: &[char] = &['!', '?', '.', ',', ':', ';', '(', ')', '-', '—'];
const WRAPPING: &[char] = &['#', '«', '»'];

/// Cleans tokens and removes stop words.
#[derive(Debug, Clone)]
pub struct WordFilter {
    stop_words: HashSet<String>,
}

impl WordFilter {
    /// Noise words plus the stop words of `language`.
    pub fn new(language: Language) -> Self {
        let stop_words = NOISE_WORDS
            .iter()
            .chain(language.stop_words())
            .map(|word| word.to_string())
            .collect();
        Self { stop_words }
    }

    /// Adds more words to drop (e.g. from the config file).
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let cleaned = clean_word(word.as_ref());
            if !cleaned.is_empty() {
                self.stop_words.insert(cleaned);
            }
        }
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    // Cleans every token and keeps the ones worth counting
    //
    // Example:
    //   ["Reply", "Glacier,", "the", "(island)"] -> ["glacier", "island"]
    pub fn clean<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| clean_word(token.as_ref()))
            .filter(|word| !word.is_empty() && !self.is_stop_word(word))
            .collect()
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

/// Lowercases a token and strips punctuation and wrapping symbols.
///
/// Punctuation inside a token turns into a space, so "a.b" becomes "a b".
pub fn clean_word(token: &str) -> String {
    let lowered = token.to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    spaced
        .trim_matches(|c: char| c.is_whitespace() || WRAPPING.contains(&c))
        .to_string()
}
