//! Polling price watchlist.
//!
//! A fixed set of rows, each bound to one symbol, is refreshed on a timer. Every
//! cycle asks a [`source::QuoteSource`] for one quote per row and applies it with
//! the [`render::Renderer`]; when the remote price endpoint fails, a simulated
//! quote from the fallback table is shown instead, marked `(sim)`.
//!
//! Modules:
//! - `row` — tracked rows and the watchlist that owns them.
//! - `source` — HTTP price source, fallback provider and tagged outcomes.
//! - `render` — price/change/tick rendering policy.
//! - `updater` — one sequential refresh pass.
//! - `poller` — background polling loop with a stop handle.
#![warn(missing_docs)]
pub mod poller;
pub mod render;
pub mod row;
pub mod source;
pub mod updater;

pub use poller::{Poller, PollerHandle};
pub use render::Renderer;
pub use row::{RowSnapshot, TrackedRow, Watchlist};
pub use source::{FetchError, HttpPriceSource, QuoteOutcome, QuoteProvider, QuoteSource, RemoteSource};
pub use updater::{CycleReport, WatchlistUpdater};
