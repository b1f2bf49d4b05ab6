//! Front-matter header scanning.
//!
//! A content file may start with a block of `key: value` lines:
//!
//! ```text
//! title: Hello
//! date: 2020-01-01
//! tags: rust, web
//!
//! Body text starts here.
//! ```
//!
//! Scanning stops at the first line that does not look like a header. A single
//! blank line directly after the block is consumed; everything after it is the
//! body.
//!
//! A header with an empty value (`key:`) is not recorded and does *not* stop
//! the scan. It is only dropped from the body when a recorded header follows
//! it, so a trailing `key:` line stays at the top of the body. Existing
//! content relies on this.

use crate::metadata::{self, HeaderFormatError, Metadata};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)").expect("valid header regex")
});

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    HeaderFormat(#[from] HeaderFormatError),
    #[error("markup error: {0}")]
    Markup(String),
}

/// Split `source` into its header metadata and the remaining body.
///
/// Fails only when a date-valued header does not match `date_format`.
pub fn parse_headers(source: &str, date_format: &str) -> Result<(Metadata, String), ParseError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut metadata = Metadata::new();
    let mut last_recorded = None;

    for (num, line) in lines.iter().enumerate() {
        let Some(caps) = HEADER_LINE.captures(line) else {
            break;
        };
        let value = caps["value"].trim();
        if value.is_empty() {
            continue;
        }
        let key = caps["key"].trim().to_lowercase();
        let typed = metadata::coerce(&key, value, date_format)?;
        metadata.insert(key, typed);
        last_recorded = Some(num);
    }

    let Some(last) = last_recorded else {
        return Ok((metadata, source.to_string()));
    };

    let mut rest = &lines[last + 1..];
    if rest.first().is_some_and(|l| l.is_empty()) {
        rest = &rest[1..];
    }
    Ok((metadata, rest.join("\n")))
}
