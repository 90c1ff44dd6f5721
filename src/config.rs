// src/config.rs
// =============================================================================
// Crawler configuration.
//
// Settings come from three places, later ones winning:
// 1. built-in defaults
// 2. an optional TOML file (--config path/to/wordcrawl.toml)
// 3. command-line flags
//
// Example file:
//
//   max_depth = 2
//   output_dir = "csv"
//   language = "en"
//   extra_stop_words = ["newsletter"]
//
//   [http]
//   timeout_secs = 10
//   concurrency = 1
//
//   [[rules]]
//   domain = "example.test"
//   tag = "div"
//   class = "content"
//   link_pattern = '^/blog/(?P<slug>[\w-]+)/$'
// =============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::rules::{RuleRegistry, RuleSpec};
use crate::words::{Language, WordFilter};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Fetches in flight within one depth level
    pub concurrency: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("wordcrawl/{}", env!("CARGO_PKG_VERSION")),
            concurrency: 1,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_depth: usize,
    pub output_dir: String,
    pub language: Language,
    pub extra_stop_words: Vec<String>,
    pub http: HttpConfig,
    pub rules: Vec<RuleSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 1,
            output_dir: "csv".to_string(),
            language: Language::default(),
            extra_stop_words: Vec::new(),
            http: HttpConfig::default(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Built-in rules plus the rules from this config.
    pub fn registry(&self) -> Result<RuleRegistry, ConfigError> {
        RuleRegistry::builtin().with_specs(&self.rules)
    }

    pub fn word_filter(&self) -> WordFilter {
        WordFilter::new(self.language).with_extra_stop_words(&self.extra_stop_words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml_str(
            r#"
            max_depth = 3
            output_dir = "out"
            language = "es"
            extra_stop_words = ["Boletín"]

            [http]
            timeout_secs = 30
            concurrency = 4

            [[rules]]
            domain = "example.test"
            tag = "article"
            link_pattern = '^/posts/(?P<slug>[\w-]+)$'
            "#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.language, Language::Spanish);
        assert_eq!(config.http.concurrency, 4);
        // Unset fields inside a table keep their defaults
        assert!(config.http.user_agent.starts_with("wordcrawl/"));

        let registry = config.registry().unwrap();
        assert!(registry.lookup("example.test").is_some());
        assert!(registry.lookup("tim.blog").is_some());

        let filter = config.word_filter();
        assert!(filter.is_stop_word("boletín"));
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        assert!(Config::from_toml_str("language = \"xx\"").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
