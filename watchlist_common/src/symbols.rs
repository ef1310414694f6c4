//! Watchlist file parsing.
//!
//! A watchlist is read either from plain text (symbols separated by commas,
//! whitespace or new lines) or from a JSON array of row descriptors that mirror
//! the page markup: `[{"symbol": "TCS", "price": "3,540.20", "change": "--"}]`.
//! Descriptors keep every field optional; deciding what to do with incomplete
//! rows is left to the caller.
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Read};

use crate::error::WatchlistError;
use crate::net::PLACEHOLDER_TEXT;

/// One row as described by the watchlist file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowMarkup {
    /// Symbol the row tracks.
    pub symbol: Option<String>,
    /// Initially displayed price text.
    pub price: Option<String>,
    /// Initially displayed change text.
    pub change: Option<String>,
}

impl RowMarkup {
    /// Complete descriptor for `symbol` with placeholder field text.
    pub fn placeholder(symbol: &str) -> Self {
        RowMarkup {
            symbol: Some(symbol.to_string()),
            price: Some(PLACEHOLDER_TEXT.to_string()),
            change: Some(PLACEHOLDER_TEXT.to_string()),
        }
    }
}

/// Trait providing file parsing for watchlist rows.
pub trait SymbolParser {
    /// Parses rows from a buffered reader holding plain-text symbols.
    ///
    /// Symbols may be separated by commas, spaces or new lines. Blank lines and
    /// lines starting with `#` are ignored.
    fn parse_from_text<R: BufRead>(reader: R) -> Result<Vec<RowMarkup>, WatchlistError>;

    /// Parses rows from a JSON array of row descriptors.
    fn parse_from_json<R: Read>(reader: R) -> Result<Vec<RowMarkup>, WatchlistError>;
}

impl SymbolParser for RowMarkup {
    fn parse_from_text<R: BufRead>(reader: R) -> Result<Vec<Self>, WatchlistError> {
        let mut rows = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(WatchlistError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for token in trimmed_line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                rows.push(RowMarkup::placeholder(token));
            }
        }
        Ok(rows)
    }

    fn parse_from_json<R: Read>(reader: R) -> Result<Vec<Self>, WatchlistError> {
        let rows: Vec<RowMarkup> = serde_json::from_reader(reader)?;
        Ok(rows)
    }
}
