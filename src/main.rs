// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config file (if any) and set up logging
// 3. Get a seed URL (argument or interactive prompt)
// 4. Crawl, print the most common words, save the CSV files
// 5. Exit with proper code (0 = success or quit, 1 = crawl aborted, 2 = error)
// =============================================================================

use std::io;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use wordcrawl::cli::{Cli, Commands, CrawlArgs, LinksArgs};
use wordcrawl::config::Config;
use wordcrawl::crawl::{page_links, Crawler, Fetcher, HttpFetcher};
use wordcrawl::error::CrawlError;
use wordcrawl::links::LinkMode;
use wordcrawl::output::CsvSink;
use wordcrawl::prompt;
use wordcrawl::words::WordCount;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Crawl(args)) => handle_crawl(config, args).await,
        Some(Commands::Links(args)) => handle_links(config, args).await,
        None => handle_crawl(config, CrawlArgs::default()).await,
    }
}

// RUST_LOG wins over --log-level when both are set
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

// Returns the seed URL from the argument, or asks for one
//
// An invalid argument is reported and the prompt takes over.
// None means the user chose to quit.
fn resolve_seed(arg: Option<&str>) -> Result<Option<String>> {
    if let Some(arg) = arg {
        match prompt::normalize_url(arg) {
            Ok(url) => return Ok(Some(url)),
            Err(e) => eprintln!("{}", e),
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt::prompt_for_url(&mut input, &mut output)
}

fn apply_overrides(config: &mut Config, args: &CrawlArgs) {
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(concurrency) = args.concurrency {
        config.http.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout_secs {
        config.http.timeout_secs = timeout;
    }
}

// Handles the crawl (default) command
async fn handle_crawl(mut config: Config, args: CrawlArgs) -> Result<i32> {
    apply_overrides(&mut config, &args);

    let Some(seed) = resolve_seed(args.url.as_deref())? else {
        println!("Bye!");
        return Ok(0);
    };

    let registry = config.registry()?;
    let filter = config.word_filter();
    let fetcher = HttpFetcher::new(config.http.timeout(), &config.http.user_agent)?;
    let crawler =
        Crawler::new(&fetcher, &registry, &filter).with_concurrency(config.http.concurrency);

    println!("🔍 Crawling: {}", seed);
    println!("📊 Max crawl depth: {}", config.max_depth);

    let output = match crawler.crawl(&seed, config.max_depth).await {
        Ok(output) => output,
        Err(e @ (CrawlError::SeedStatus { .. } | CrawlError::SeedUnreachable(_))) => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let tally = output.word_tally();

    println!(
        "📄 Visited {} page(s) ({} fetched, {} failed, {} level(s) deep)",
        output.visited.len(),
        output.stats.pages_fetched,
        output.stats.pages_failed,
        output.stats.levels_completed
    );
    println!("🔤 {} distinct word(s)\n", tally.len());

    print_words(&tally.most_common(args.top), args.json)?;

    if !args.no_save {
        let sink = CsvSink::new(&config.output_dir);
        let timestamp = Local::now();
        let words_path = sink.save_words(&output.seed, &tally, timestamp)?;
        let links_path = sink.save_links(&output.seed, &output.visited, timestamp)?;
        println!("\n💾 Saved {}", words_path.display());
        println!("💾 Saved {}", links_path.display());
    }

    Ok(0)
}

// Handles the 'links' command: one page, no crawling
async fn handle_links(config: Config, args: LinksArgs) -> Result<i32> {
    let Some(url) = resolve_seed(args.url.as_deref())? else {
        println!("Bye!");
        return Ok(0);
    };

    let registry = config.registry()?;
    let fetcher = HttpFetcher::new(config.http.timeout(), &config.http.user_agent)?;

    let response = match fetcher.fetch(&url).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
    };
    if !response.is_success() {
        eprintln!("❌ Invalid request, you cannot view this. Status: {}", response.status);
        return Ok(1);
    }

    let mode = if args.all { LinkMode::All } else { LinkMode::Pattern };
    let paths = page_links(&url, &response.body, &registry, mode);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        for path in &paths {
            println!("{}", path);
        }
        println!("\n📋 {} link(s)", paths.len());
    }

    Ok(0)
}

// Prints the word summary either as a table or JSON
fn print_words(rows: &[WordCount], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!("{:<40} {:>8}", "WORD", "COUNT");
    println!("{}", "=".repeat(49));
    for row in rows {
        println!("{:<40} {:>8}", row.word, row.count);
    }
    Ok(())
}
