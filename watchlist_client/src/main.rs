//! Watchlist Client — polls a remote price endpoint for every symbol in a
//! watchlist file and prints the rendered rows after each refresh cycle. When the
//! endpoint is unreachable or answers with something unexpected, the row shows a
//! locally simulated price marked `(sim)` instead.
//!
//! Usage example (CLI):
//! ```bash
//! watchlist_client --path ./watchlist.txt --endpoint https://prices.local/api/price
//! ```
//!
//! The watchlist file holds symbols separated by commas, spaces or new lines, or a
//! `.json` array of `{ "symbol", "price", "change" }` row descriptors.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use crossbeam_channel::{bounded, select, unbounded};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use watchlist_client::{
    HttpPriceSource, Poller, QuoteProvider, Renderer, RowSnapshot, Watchlist, WatchlistUpdater,
};
use watchlist_common::net::TICK_DURATION_MS;
use watchlist_common::{FallbackTable, Result, WatchlistError};

fn main() -> Result<(), WatchlistError> {
    init_logger();
    let args = Args::parse();

    let mut watchlist = Watchlist::load(&normalize_path(&args.path))?;

    let mut fallback = FallbackTable::default();
    if let Some(path) = &args.fallback_prices {
        let file = File::open(normalize_path(path))?;
        fallback.merge_json(BufReader::new(file))?;
        info!("Fallback prices merged from {}", path);
    }

    let remote = HttpPriceSource::new(
        &args.endpoint,
        args.request_timeout_ms.map(Duration::from_millis),
    )?;
    info!("Price endpoint: {}", remote.endpoint());

    let renderer = Renderer::new(args.locale, Duration::from_millis(TICK_DURATION_MS));
    let mut updater = WatchlistUpdater::new(QuoteProvider::new(remote, fallback), renderer);

    if args.once {
        let report = updater.refresh_all(&mut watchlist);
        print_rows(&watchlist.snapshot(Instant::now()));
        info!(
            "{} live, {} simulated, {} unavailable",
            report.live, report.simulated, report.unavailable
        );
        return Ok(());
    }

    let (snapshot_tx, snapshot_rx) = unbounded::<Vec<RowSnapshot>>();
    let Some(handle) = Poller::start(
        watchlist,
        updater,
        Duration::from_millis(args.interval_ms),
        snapshot_tx,
    ) else {
        return Ok(());
    };

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping watchlist...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| WatchlistError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;

    info!("Watchlist is running. Press Ctrl+C to exit.");
    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(snapshot_rx) -> rows => match rows {
                Ok(rows) => print_rows(&rows),
                Err(_) => break,
            },
        }
    }

    handle.stop()?;
    Ok(())
}

fn print_rows(rows: &[RowSnapshot]) {
    for row in rows {
        info!("{}", row);
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_strips_quotes_and_whitespace() {
        assert_eq!(normalize_path("  \"C:\\lists\\nse.txt\" "), PathBuf::from("C:\\lists\\nse.txt"));
        assert_eq!(normalize_path("watchlist.json"), PathBuf::from("watchlist.json"));
        assert_eq!(normalize_path("\"unbalanced"), PathBuf::from("\"unbalanced"));
    }

    #[test]
    fn args_default_to_fifteen_second_polling() {
        let args = Args::try_parse_from(["watchlist_client", "--path", "w.txt"]).unwrap();
        assert_eq!(args.interval_ms, 15_000);
        assert_eq!(args.locale, watchlist_common::format::NumberLocale::Indian);
        assert!(!args.once);
        assert!(Args::try_parse_from(["watchlist_client", "--path", "w.txt", "--interval-ms", "0"]).is_err());
        let western = Args::try_parse_from(["watchlist_client", "--path", "w.txt", "--locale", "western"]).unwrap();
        assert_eq!(western.locale, watchlist_common::format::NumberLocale::Western);
    }
}
