// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Running `wordcrawl` with no arguments asks for a URL and crawls it with
// the default settings. Subcommands give more control:
//
//   wordcrawl crawl https://tim.blog --max-depth 2
//   wordcrawl links https://tim.blog --all
//
// Most crawl flags are Option<T>: when a flag is absent, the config file
// (or the built-in default) decides.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::words::Language;

#[derive(Parser, Debug)]
#[command(
    name = "wordcrawl",
    version,
    about = "Crawl a website by depth and count the words of its articles",
    long_about = "wordcrawl starts from a seed URL, follows same-site links that match the \
                  site's link pattern, extracts the main content of every page and counts \
                  its words. Visited links and word counts are saved as CSV files."
)]
pub struct Cli {
    /// TOML config file with crawl settings and domain rules
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a site and count words (the default when no subcommand is given)
    ///
    /// Example: wordcrawl crawl https://www.nosolosig.com/libros-geo --max-depth 1
    Crawl(CrawlArgs),

    /// List the local links found in the content of one page
    ///
    /// Example: wordcrawl links https://tim.blog --all
    Links(LinksArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Seed URL; asked for interactively when missing
    pub url: Option<String>,

    /// How many link hops to follow from the seed (0 = seed only)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Directory for the CSV files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Language of the stop-word list
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Pages fetched at once within a depth level
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Number of most common words to print
    #[arg(long, default_value_t = 100)]
    pub top: usize,

    /// Print the word summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Don't write CSV files
    #[arg(long)]
    pub no_save: bool,
}

impl Default for CrawlArgs {
    fn default() -> Self {
        Self {
            url: None,
            max_depth: None,
            output_dir: None,
            language: None,
            concurrency: None,
            timeout_secs: None,
            top: 100,
            json: false,
            no_save: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LinksArgs {
    /// Page URL; asked for interactively when missing
    pub url: Option<String>,

    /// Keep every same-site link instead of only pattern matches
    #[arg(long)]
    pub all: bool,

    /// Output as a JSON array
    #[arg(long)]
    pub json: bool,
}
