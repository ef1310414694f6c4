//! Error types shared across the watchlist workspace.
//!
//! The `WatchlistError` enum unifies the failure cases met while loading a
//! watchlist, decoding JSON payloads and running the polling loop, so every
//! crate can propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the binary.
#[derive(Error, Debug)]
pub enum WatchlistError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// The same symbol appears on more than one row.
    #[error("Duplicate symbol in watchlist: {0}")]
    DuplicateSymbol(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A quote carried a price or change that cannot be rendered.
    #[error("Invalid quote for {symbol}: {reason}")]
    InvalidQuote {
        /// Symbol the quote was produced for.
        symbol: String,
        /// Why the quote was rejected.
        reason: String,
    },

    /// The polling worker thread panicked.
    #[error("Poller worker panicked")]
    WorkerPanicked,
}
