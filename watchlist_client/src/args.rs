//! Command-line arguments for the watchlist client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use watchlist_common::format::NumberLocale;
use watchlist_common::net::{DEFAULT_PRICE_ENDPOINT, REFRESH_INTERVAL_MS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the watchlist: a text file of symbols separated by commas,
    /// spaces or new lines, or a `.json` array of row descriptors.
    #[clap(long)]
    pub path: String,

    /// Remote price endpoint, queried as `<endpoint>?symbol=<symbol>`.
    #[clap(long, default_value = DEFAULT_PRICE_ENDPOINT)]
    pub endpoint: String,

    /// Milliseconds between refresh cycles.
    #[clap(long, default_value_t = REFRESH_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Digit grouping used for prices.
    #[clap(long, value_enum, default_value_t = NumberLocale::Indian)]
    pub locale: NumberLocale,

    /// JSON object of `{"SYMBOL": base_price}` merged over the built-in fallback prices.
    #[clap(long)]
    pub fallback_prices: Option<String>,

    /// Per-request timeout in milliseconds; the HTTP client default applies when absent.
    #[clap(long)]
    pub request_timeout_ms: Option<u64>,

    /// Run a single refresh cycle, print the rows and exit.
    #[clap(long)]
    pub once: bool,
}
