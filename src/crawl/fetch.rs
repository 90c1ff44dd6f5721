// src/crawl/fetch.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// The crawler only talks to the Fetcher trait, so tests can hand it an
// in-memory set of pages instead of a real network.
//
// Rust concepts:
// - Traits: a shared interface (like an interface in Java/TypeScript)
// - async fn in traits: each implementation returns its own future
// - reqwest::Client: connection pooling, timeouts, user agent
// =============================================================================

use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

/// Status code and body of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can fetch a URL.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

// The reqwest-backed fetcher used by the CLI
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client
    //
    // Parameters:
    //   timeout: per-request timeout (connect + read)
    //   user_agent: value of the User-Agent header
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();

        // Failed pages contribute nothing, so skip downloading their body
        if !status.is_success() {
            return Ok(FetchResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return Ok for a 404?
//    - The request itself worked, the server just said "no"
//    - The crawler decides what a status means (seed: fatal, others: skip)
//    - Err is reserved for requests that never got an answer
//
// 2. Why #[allow(async_fn_in_trait)]?
//    - The compiler warns that callers can't add a Send bound to the future
//    - The crawler polls every future on the task that created it, so it
//      never needs Send
// -----------------------------------------------------------------------------
