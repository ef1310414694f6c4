//! Tracked rows and the watchlist that owns them.
//!
//! The row set is built once from the watchlist file and never grows or
//! shrinks afterwards. Each `TrackedRow` keeps the text it currently displays;
//! the previously rendered price is always read back from that text.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use watchlist_common::format::{ChangeClass, parse_displayed_price};
use watchlist_common::symbols::{RowMarkup, SymbolParser};
use watchlist_common::{Result, WatchlistError};

/// Display row bound to one symbol.
#[derive(Debug, Clone)]
pub struct TrackedRow {
    symbol: String,
    price_text: String,
    change_text: String,
    change_class: Option<ChangeClass>,
    tick_until: Option<Instant>,
    is_updating: bool,
    live: bool,
}

impl TrackedRow {
    /// Row showing `price_text` and `change_text` until its first update.
    pub fn new(symbol: &str, price_text: &str, change_text: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price_text: price_text.to_string(),
            change_text: change_text.to_string(),
            change_class: None,
            tick_until: None,
            is_updating: false,
            live: false,
        }
    }

    /// Symbol this row tracks.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Currently displayed price text.
    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    /// Currently displayed change text.
    pub fn change_text(&self) -> &str {
        &self.change_text
    }

    /// Current change class, if any.
    pub fn change_class(&self) -> Option<ChangeClass> {
        self.change_class
    }

    /// `true` while a quote for this row is being resolved.
    pub fn is_updating(&self) -> bool {
        self.is_updating
    }

    /// `true` once the row has taken part in a refresh cycle.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Price parsed back from the displayed text; `None` before the first update.
    pub fn last_rendered_price(&self) -> Option<f64> {
        parse_displayed_price(&self.price_text)
    }

    /// Whether the tick marker is still showing at `now`.
    pub fn is_ticking(&self, now: Instant) -> bool {
        self.tick_until.is_some_and(|deadline| now < deadline)
    }

    pub(crate) fn set_price_text(&mut self, text: String) {
        self.price_text = text;
    }

    pub(crate) fn set_change(&mut self, text: String, class: Option<ChangeClass>) {
        self.change_text = text;
        self.change_class = class;
    }

    pub(crate) fn start_tick(&mut self, until: Instant) {
        self.tick_until = Some(until);
    }

    pub(crate) fn set_updating(&mut self, updating: bool) {
        self.is_updating = updating;
    }

    pub(crate) fn mark_live(&mut self) {
        self.live = true;
    }

    /// Immutable copy of what the row shows at `now`.
    pub fn snapshot(&self, now: Instant) -> RowSnapshot {
        RowSnapshot {
            symbol: self.symbol.clone(),
            price: self.price_text.clone(),
            change: self.change_text.clone(),
            change_class: self.change_class,
            ticking: self.is_ticking(now),
        }
    }
}

/// What a row displayed at the end of a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    /// Row symbol.
    pub symbol: String,
    /// Price text.
    pub price: String,
    /// Change text.
    pub change: String,
    /// Change class.
    pub change_class: Option<ChangeClass>,
    /// Tick marker state.
    pub ticking: bool,
}

impl fmt::Display for RowSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {:>14}  {}", self.symbol, self.price, self.change)?;
        if let Some(class) = self.change_class {
            write!(f, " [{}]", class)?;
        }
        if self.ticking {
            write!(f, " *")?;
        }
        Ok(())
    }
}

/// Fixed, ordered set of rows.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    rows: Vec<TrackedRow>,
}

impl Watchlist {
    /// Build rows from descriptors, skipping any that lack a symbol, price or change field.
    ///
    /// Any non-empty symbol is accepted as written, spaces included; it is
    /// URL-encoded when fetched. Returns an error for a symbol used by two rows.
    pub fn from_markup(markup: Vec<RowMarkup>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(markup.len());

        for (index, descriptor) in markup.into_iter().enumerate() {
            let (Some(symbol), Some(price), Some(change)) =
                (descriptor.symbol, descriptor.price, descriptor.change)
            else {
                debug!("Skipping row {}: missing symbol, price or change field", index);
                continue;
            };
            let symbol = symbol.trim();
            if symbol.is_empty() {
                debug!("Skipping row {}: empty symbol", index);
                continue;
            }
            if !seen.insert(symbol.to_string()) {
                return Err(WatchlistError::DuplicateSymbol(symbol.to_string()));
            }
            rows.push(TrackedRow::new(symbol, &price, &change));
        }
        Ok(Self { rows })
    }

    /// Load a watchlist file; `.json` files hold row descriptors, anything else plain symbols.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let markup = if is_json {
            RowMarkup::parse_from_json(reader)?
        } else {
            RowMarkup::parse_from_text(reader)?
        };
        let watchlist = Self::from_markup(markup)?;
        info!("Loaded {} watchlist rows from {}", watchlist.len(), path.display());
        Ok(watchlist)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when there is nothing to track.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[TrackedRow] {
        &self.rows
    }

    /// Row tracking `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&TrackedRow> {
        self.rows.iter().find(|row| row.symbol == symbol)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [TrackedRow] {
        &mut self.rows
    }

    /// Snapshot of every row at `now`.
    pub fn snapshot(&self, now: Instant) -> Vec<RowSnapshot> {
        self.rows.iter().map(|row| row.snapshot(now)).collect()
    }
}
