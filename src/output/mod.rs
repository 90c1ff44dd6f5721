// src/output/mod.rs
// =============================================================================
// This module saves crawl results.
//
// Submodules:
// - csv_sink: links and word counts as CSV files in an output directory
// =============================================================================

mod csv_sink;

pub use csv_sink::CsvSink;
