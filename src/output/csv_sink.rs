// src/output/csv_sink.rs
// =============================================================================
// Writes crawl results to CSV files.
//
// Two files per run, both named after the seed's domain and the run time:
//   csv/example-test-scraped-links__2026-10-16_14-03-59.csv  (header: links)
//   csv/example-test-words__2026-10-16_14-03-59.csv          (header: word,count)
//
// The output directory is created on first use.
// =============================================================================

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::links::netloc;
use crate::words::WordTally;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // Writes one URL per row
    //
    // Returns: path of the written file
    pub fn save_links<'a, I>(&self, seed: &str, links: I, timestamp: DateTime<Local>) -> Result<PathBuf>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let path = self.file_path(seed, "scraped-links", timestamp)?;
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("could not create {}", path.display()))?;

        writer.write_record(["links"])?;
        for link in links {
            writer.write_record([link])?;
        }
        writer.flush()?;

        Ok(path)
    }

    // Writes (word, count) rows, most frequent first
    //
    // Returns: path of the written file
    pub fn save_words(&self, seed: &str, tally: &WordTally, timestamp: DateTime<Local>) -> Result<PathBuf> {
        let path = self.file_path(seed, "words", timestamp)?;
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("could not create {}", path.display()))?;

        writer.write_record(["word", "count"])?;
        for row in tally.sorted() {
            writer.write_record([row.word, row.count.to_string()])?;
        }
        writer.flush()?;

        Ok(path)
    }

    fn file_path(&self, seed: &str, kind: &str, timestamp: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("could not create output directory {}", self.dir.display()))?;

        let file_name = format!(
            "{}-{}__{}.csv",
            file_stem(seed),
            kind,
            timestamp.format(TIMESTAMP_FORMAT)
        );
        Ok(self.dir.join(file_name))
    }
}

// "www.example.test:8080" -> "www-example-test-8080"
fn file_stem(seed: &str) -> String {
    let host = netloc(seed);
    let host = if host.is_empty() { "unknown".to_string() } else { host };
    host.replace(['.', ':'], "-")
}
