//!
//! Common types and utilities shared by the watchlist crates.
//!
//! This crate aggregates:
//! - `error` — unified error type `WatchlistError` used across the workspace.
//! - `result` — handy `Result<T, WatchlistError>` alias.
//! - `symbols` — watchlist file parsing into row descriptors.
//! - `quote` — the `Quote` model and the remote price body.
//! - `fallback` — simulated quotes for when the remote endpoint is down.
//! - `format` — price/change display formatting.
//! - `net` — endpoint and scheduling constants.
#![warn(missing_docs)]
pub mod error;
pub mod fallback;
pub mod format;
pub mod net;
pub mod quote;
pub mod result;
pub mod symbols;

pub use error::WatchlistError;
pub use fallback::FallbackTable;
pub use quote::Quote;
pub use result::Result;
