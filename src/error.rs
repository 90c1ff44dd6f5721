// src/error.rs
// =============================================================================
// Error types shared across the crawler.
//
// The application layer (main.rs) uses anyhow::Result, but the pieces below
// it return these typed errors so callers can tell a bad seed URL from a
// network failure from a broken config file.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: automatic conversion so the ? operator works across error types
// =============================================================================

use thiserror::Error;

/// A page could not be fetched at all (no HTTP status to look at).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// DNS failure, refused connection, unreachable host
    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// Anything else reqwest reports (bad body encoding, redirect loop, ...)
    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    // Sorts a reqwest error into one of our variants
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Other {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// The seed URL typed by the user is not usable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This url does not start with http:// or https://")]
    MissingScheme,

    #[error("This url has no host: {0}")]
    NoHost(String),

    #[error("This url could not be parsed: {0}")]
    Malformed(String),
}

/// Config file or domain rule problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid link pattern for {domain}: {source}")]
    Pattern {
        domain: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid content tag '{tag}' for {domain}")]
    Tag { domain: String, tag: String },
}

/// Conditions that abort a whole crawl.
///
/// Only the seed page can do this; every other page failure is logged and
/// skipped.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid request, you cannot view this. Status: {status}")]
    SeedStatus { url: String, status: u16 },

    #[error("No connection to the url: {0}")]
    SeedUnreachable(#[source] FetchError),

    #[error(transparent)]
    InvalidSeed(#[from] ValidationError),
}
