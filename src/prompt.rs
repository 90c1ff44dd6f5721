// src/prompt.rs
// =============================================================================
// Seed URL input.
//
// The seed can come from the command line or, when it is missing, from an
// interactive prompt:
// - "example.com" is turned into "http://example.com"
// - anything that still doesn't start with http:// or https:// is rejected
//   and the user is asked again
// - typing "q" quits without an error
//
// Rust concepts:
// - BufRead / Write generics: the prompt works on stdin/stdout and on
//   in-memory buffers in tests
// =============================================================================

use std::io::{BufRead, Write};

use anyhow::Result;
use regex::Regex;
use url::Url;

use crate::error::ValidationError;

const QUIT: &str = "q";

// Prefixes "http://" when the input has no "scheme://" of its own
//
// "httpbin.org" has no scheme even though it starts with "http".
fn append_http(input: &str) -> String {
    // Constant pattern
    let has_scheme =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("scheme prefix pattern is valid");
    if has_scheme.is_match(input) {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

// Normalizes and validates a seed URL
//
// Examples:
//   "example.com"          -> Ok("http://example.com")
//   "https://example.com/" -> Ok("https://example.com/")
//   "httpx://example.com"  -> Err(MissingScheme)
pub fn normalize_url(input: &str) -> Result<String, ValidationError> {
    let url = append_http(input.trim());

    // Constant pattern
    let scheme = Regex::new(r"^https?://").expect("scheme pattern is valid");
    if !scheme.is_match(&url) {
        return Err(ValidationError::MissingScheme);
    }

    let parsed = Url::parse(&url).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::NoHost(url));
    }

    Ok(url)
}

// Asks for a URL until a valid one is entered
//
// Returns:
//   Ok(Some(url)) - a valid, normalized URL
//   Ok(None)      - the user typed "q" or input ended
pub fn prompt_for_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    loop {
        write!(output, "What is your url? ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer == QUIT {
            return Ok(None);
        }

        match normalize_url(answer) {
            Ok(url) => return Ok(Some(url)),
            Err(e) => {
                writeln!(output, "{}", e)?;
                writeln!(output, "type '{}' to quit", QUIT)?;
            }
        }
    }
}
