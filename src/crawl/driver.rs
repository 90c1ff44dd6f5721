// src/crawl/driver.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Canonicalize the seed URL and fetch it (depth 0). If that fails the
//    crawl stops here.
// 2. The seed's matching links become the frontier for depth 1.
// 3. For each depth level up to max_depth:
//    - drop frontier URLs that were already visited
//    - mark the rest visited, then fetch and process them
//    - their matching links form the frontier of the next level
// 4. Stop when the frontier is empty or max_depth is reached.
//
// A page that fails (network error, non-2xx status) adds no words and no
// links but stays visited, so it is never retried.
//
// Rust concepts:
// - BTreeSet: sorted sets keep the fetch order and the output deterministic
// - Streams: buffered(n) runs up to n fetches at once but yields results in
//   the order the URLs went in
// - Generics: Crawler<F: Fetcher> works with the real HTTP client or a test
//   double
// =============================================================================

use std::collections::BTreeSet;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use super::fetch::Fetcher;
use super::page::{process_page, PageResult};
use crate::error::{CrawlError, ValidationError};
use crate::links::{canonical_url, netloc, resolve_path};
use crate::rules::RuleRegistry;
use crate::words::{WordFilter, WordTally};

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched with a 2xx status, seed included
    pub pages_fetched: usize,
    /// Pages that failed to fetch or returned a non-2xx status
    pub pages_failed: usize,
    /// Depth levels beyond the seed that were processed
    pub levels_completed: usize,
}

/// Everything a crawl produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutput {
    pub seed: String,
    pub visited: BTreeSet<String>,
    /// Cleaned words of every page, in crawl order
    pub words: Vec<String>,
    pub stats: CrawlStats,
}

impl CrawlOutput {
    pub fn word_tally(&self) -> WordTally {
        WordTally::from_words(&self.words)
    }
}

pub struct Crawler<'a, F: Fetcher> {
    fetcher: &'a F,
    registry: &'a RuleRegistry,
    filter: &'a WordFilter,
    concurrency: usize,
}

impl<'a, F: Fetcher> Crawler<'a, F> {
    pub fn new(fetcher: &'a F, registry: &'a RuleRegistry, filter: &'a WordFilter) -> Self {
        Self {
            fetcher,
            registry,
            filter,
            concurrency: 1,
        }
    }

    /// Maximum number of fetches in flight within one depth level.
    ///
    /// 1 (the default) fetches strictly one page at a time.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    // Crawls from `seed` down to `max_depth` link hops
    //
    // Parameters:
    //   seed: absolute URL of the first page (depth 0); it is canonicalized
    //         so links back to it match the visited entry
    //   max_depth: 0 = only the seed, 1 = seed + pages it links to, ...
    //
    // Returns: visited URLs and all collected words, or an error when the
    // seed page itself cannot be fetched
    pub async fn crawl(&self, seed: &str, max_depth: usize) -> Result<CrawlOutput, CrawlError> {
        let seed = canonical_url(seed).ok_or_else(|| ValidationError::NoHost(seed.to_string()))?;
        let seed = seed.as_str();
        let seed_page = self.fetch_seed(seed).await?;

        let mut visited = BTreeSet::from([seed.to_string()]);
        let mut frontier = self.resolve_all(seed, &seed_page.discovered_paths);
        let mut words = seed_page.words;
        let mut stats = CrawlStats {
            pages_fetched: 1,
            ..CrawlStats::default()
        };

        for depth in 1..=max_depth {
            let candidates: Vec<String> = std::mem::take(&mut frontier)
                .into_iter()
                .filter(|url| !visited.contains(url))
                .collect();

            if candidates.is_empty() {
                debug!("Frontier empty at depth {}, stopping", depth);
                break;
            }

            info!("Depth {}: {} page(s) to visit", depth, candidates.len());
            visited.extend(candidates.iter().cloned());

            let pages: Vec<Option<PageResult>> = stream::iter(candidates.iter())
                .map(|url| self.visit(url))
                .buffered(self.concurrency)
                .collect()
                .await;

            for page in pages {
                match page {
                    Some(page) => {
                        stats.pages_fetched += 1;
                        frontier.extend(self.resolve_all(seed, &page.discovered_paths));
                        words.extend(page.words);
                    }
                    None => stats.pages_failed += 1,
                }
            }

            stats.levels_completed = depth;
        }

        info!(
            "Crawl of {} finished: {} visited, {} words",
            seed,
            visited.len(),
            words.len()
        );

        Ok(CrawlOutput {
            seed: seed.to_string(),
            visited,
            words,
            stats,
        })
    }

    /// Fetches and processes the seed page. Any failure here is fatal.
    pub async fn fetch_seed(&self, seed: &str) -> Result<PageResult, CrawlError> {
        if netloc(seed).is_empty() {
            return Err(ValidationError::NoHost(seed.to_string()).into());
        }

        info!("{} scraping...", seed);

        let response = self
            .fetcher
            .fetch(seed)
            .await
            .map_err(CrawlError::SeedUnreachable)?;

        if !response.is_success() {
            return Err(CrawlError::SeedStatus {
                url: seed.to_string(),
                status: response.status,
            });
        }

        Ok(process_page(seed, &response.body, self.registry, self.filter))
    }

    // Fetches one non-seed page; None when it failed
    async fn visit(&self, url: &str) -> Option<PageResult> {
        info!("{} scraping...", url);

        match self.fetcher.fetch(url).await {
            Ok(response) if response.is_success() => {
                Some(process_page(url, &response.body, self.registry, self.filter))
            }
            Ok(response) => {
                warn!("Skipping {}: HTTP {}", url, response.status);
                None
            }
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                None
            }
        }
    }

    fn resolve_all(&self, origin: &str, paths: &BTreeSet<String>) -> BTreeSet<String> {
        paths
            .iter()
            .filter_map(|path| resolve_path(origin, path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::FetchResponse;
    use crate::error::FetchError;
    use crate::rules::DomainRule;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SEED: &str = "http://example.test/blog";

    // In-memory pages; anything not listed fails like an unreachable host
    struct FakeFetcher {
        pages: HashMap<String, (u16, String)>,
        calls: Mutex<HashMap<String, usize>>,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                calls: Mutex::new(HashMap::new()),
            }
        }

        fn page(mut self, url: &str, status: u16, content: &str) -> Self {
            let body = format!(
                "<html><body><nav>Menu</nav><div class=\"content\">{}</div></body></html>",
                content
            );
            self.pages.insert(url.to_string(), (status, body));
            self
        }

        fn calls(&self) -> HashMap<String, usize> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
            *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
            match self.pages.get(url) {
                Some((status, body)) => Ok(FetchResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Err(FetchError::Connect {
                    url: url.to_string(),
                    message: "unreachable".to_string(),
                }),
            }
        }
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::empty();
        registry.insert(
            DomainRule::new("example.test", Some(("div", Some("content"))), r"^/blog/[\w-]+/$")
                .unwrap(),
        );
        registry
    }

    fn blog() -> FakeFetcher {
        FakeFetcher::new()
            .page(
                SEED,
                200,
                r#"<a href="/blog/a-1/">x</a> <a href="/blog/a-2/">y</a> <a href="/other">z</a>"#,
            )
            .page("http://example.test/blog/a-1/", 200, "Island")
            .page("http://example.test/blog/a-2/", 200, "island glacier")
            .page("http://example.test/other", 200, "never fetched")
    }

    fn set(urls: &[&str]) -> BTreeSet<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_seed_frontier_matches_pattern() {
        let fetcher = blog();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let seed_page = crawler.fetch_seed(SEED).await.unwrap();
        assert_eq!(seed_page.discovered_paths, set(&["/blog/a-1/", "/blog/a-2/"]));
    }

    #[tokio::test]
    async fn test_depth_one_crawl() {
        let fetcher = blog();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 1).await.unwrap();
        assert_eq!(
            output.visited,
            set(&[
                SEED,
                "http://example.test/blog/a-1/",
                "http://example.test/blog/a-2/",
            ])
        );
        assert!(!fetcher.calls().contains_key("http://example.test/other"));
        assert_eq!(output.stats.pages_fetched, 3);
        assert_eq!(output.stats.levels_completed, 1);
    }

    #[tokio::test]
    async fn test_words_aggregate_across_pages() {
        let fetcher = blog();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 1).await.unwrap();
        let tally = output.word_tally();
        assert_eq!(tally.count("island"), 2);
        assert_eq!(tally.count("glacier"), 1);
        // <nav> is outside the content element
        assert_eq!(tally.count("menu"), 0);
    }

    #[tokio::test]
    async fn test_max_depth_zero_only_visits_seed() {
        let fetcher = blog();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 0).await.unwrap();
        assert_eq!(output.visited, set(&[SEED]));
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_every_url_fetched_once() {
        let fetcher = FakeFetcher::new()
            .page(SEED, 200, r#"<a href="/blog/a/">a</a><a href="/blog/b/">b</a>"#)
            .page(
                "http://example.test/blog/a/",
                200,
                r#"<a href="/blog/b/">b</a><a href="/blog/c/">c</a><a href="/blog/">back</a>"#,
            )
            .page(
                "http://example.test/blog/b/",
                200,
                r#"<a href="/blog/a/">a</a><a href="/blog/c/">c</a>"#,
            )
            .page(
                "http://example.test/blog/c/",
                200,
                r#"<a href="/blog/a/">a</a><a href="http://example.test/blog/b/">b</a>"#,
            );
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 5).await.unwrap();
        assert_eq!(output.visited.len(), 4);
        assert!(fetcher.calls().values().all(|count| *count == 1));
        // Level 3 has nothing new, so the loop stops after level 2
        assert_eq!(output.stats.levels_completed, 2);
    }

    #[tokio::test]
    async fn test_failed_pages_are_visited_but_empty() {
        let fetcher = FakeFetcher::new()
            .page(
                SEED,
                200,
                r#"<a href="/blog/ok/">1</a><a href="/blog/gone/">2</a><a href="/blog/down/">3</a>"#,
            )
            .page("http://example.test/blog/ok/", 200, "island")
            .page("http://example.test/blog/gone/", 404, "island");
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 2).await.unwrap();
        assert_eq!(output.visited.len(), 4);
        assert!(output.visited.contains("http://example.test/blog/down/"));
        assert_eq!(output.word_tally().count("island"), 1);
        assert_eq!(output.stats.pages_failed, 2);
    }

    #[tokio::test]
    async fn test_page_without_content_element() {
        let mut fetcher = FakeFetcher::new().page(SEED, 200, r#"<a href="/blog/bare/"></a>"#);
        fetcher.pages.insert(
            "http://example.test/blog/bare/".to_string(),
            (200, "<body><p>island</p><a href='/blog/next/'>n</a></body>".to_string()),
        );
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl(SEED, 3).await.unwrap();
        assert_eq!(output.visited.len(), 2);
        assert!(output.words.is_empty());
        assert_eq!(output.stats.pages_failed, 0);
    }

    #[tokio::test]
    async fn test_seed_status_is_fatal() {
        let fetcher = FakeFetcher::new().page(SEED, 403, "forbidden");
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let result = crawler.crawl(SEED, 1).await;
        assert!(matches!(
            result,
            Err(CrawlError::SeedStatus { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_unreachable_is_fatal() {
        let fetcher = FakeFetcher::new();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let result = crawler.crawl(SEED, 1).await;
        assert!(matches!(result, Err(CrawlError::SeedUnreachable(_))));
    }

    #[tokio::test]
    async fn test_seed_without_host_is_rejected() {
        let fetcher = blog();
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let result = crawler.crawl("/blog", 1).await;
        assert!(matches!(result, Err(CrawlError::InvalidSeed(_))));
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_seed_spelling_does_not_cause_refetch() {
        let fetcher = FakeFetcher::new().page(
            "http://example.test/blog/post-a/",
            200,
            r#"island <a href="/blog/post-a/">self</a>"#,
        );
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler
            .crawl("http://Example.Test:80/blog/post-a/", 2)
            .await
            .unwrap();

        assert_eq!(output.seed, "http://example.test/blog/post-a/");
        assert_eq!(output.visited, set(&["http://example.test/blog/post-a/"]));
        assert_eq!(fetcher.calls().get("http://example.test/blog/post-a/"), Some(&1));
        assert_eq!(output.word_tally().count("island"), 1);
    }

    #[tokio::test]
    async fn test_unknown_domain_uses_fallback_rule() {
        let mut fetcher = FakeFetcher::new();
        let pages = [
            (
                "http://plain.test/",
                r#"<body><p>Glacier</p>
                    <a href="/island-notes/">notes</a>
                    <a href="/deep/path/">deep</a>
                    <a href="/about">about</a></body>"#,
            ),
            ("http://plain.test/island-notes/", "<body><nav>Glacier</nav></body>"),
            ("http://plain.test/deep/path/", "<body>unreached</body>"),
            ("http://plain.test/about", "<body>unreached</body>"),
        ];
        for (url, body) in pages {
            fetcher.pages.insert(url.to_string(), (200, body.to_string()));
        }
        let registry = registry();
        let filter = WordFilter::default();
        let crawler = Crawler::new(&fetcher, &registry, &filter);

        let output = crawler.crawl("http://plain.test/", 2).await.unwrap();

        // Only "/island-notes/" fits the fallback pattern
        assert_eq!(
            output.visited,
            set(&["http://plain.test/", "http://plain.test/island-notes/"])
        );
        // No content rule, so the whole <body> counts, <nav> included
        assert_eq!(output.word_tally().count("glacier"), 2);
        assert_eq!(output.word_tally().count("unreached"), 0);
    }

    #[tokio::test]
    async fn test_concurrency_does_not_change_output() {
        let registry = registry();
        let filter = WordFilter::default();

        let serial_fetcher = blog();
        let serial = Crawler::new(&serial_fetcher, &registry, &filter)
            .crawl(SEED, 2)
            .await
            .unwrap();

        let parallel_fetcher = blog();
        let parallel = Crawler::new(&parallel_fetcher, &registry, &filter)
            .with_concurrency(8)
            .crawl(SEED, 2)
            .await
            .unwrap();

        assert_eq!(serial, parallel);
    }
}
