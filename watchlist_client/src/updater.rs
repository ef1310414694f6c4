//! One refresh pass over the watchlist.
//!
//! Rows are processed strictly in order: a row's quote is resolved and applied
//! before the next row is looked at. A failure on one row is rendered on that
//! row only and never stops the pass.

use std::time::Instant;

use log::{debug, warn};

use crate::render::Renderer;
use crate::row::Watchlist;
use crate::source::{QuoteOutcome, QuoteSource};

/// Per-cycle counts of how each row was resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Rows updated from the remote endpoint.
    pub live: usize,
    /// Rows updated from simulated quotes.
    pub simulated: usize,
    /// Rows that could not be updated.
    pub unavailable: usize,
}

impl CycleReport {
    /// Total rows processed.
    pub fn total(&self) -> usize {
        self.live + self.simulated + self.unavailable
    }
}

/// Drives a `QuoteSource` over every row of a watchlist.
pub struct WatchlistUpdater<S> {
    source: S,
    renderer: Renderer,
}

impl<S: QuoteSource> WatchlistUpdater<S> {
    /// Updater resolving quotes through `source` and drawing them with `renderer`.
    pub fn new(source: S, renderer: Renderer) -> Self {
        Self { source, renderer }
    }

    /// Quote source in use.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Refresh every row once, in order. Does nothing for an empty watchlist.
    pub fn refresh_all(&mut self, watchlist: &mut Watchlist) -> CycleReport {
        let mut report = CycleReport::default();
        if watchlist.is_empty() {
            return report;
        }

        for row in watchlist.rows_mut().iter_mut() {
            row.mark_live();
        }

        for row in watchlist.rows_mut().iter_mut() {
            let previous_price = row.last_rendered_price();
            row.set_updating(true);

            let resolved = self.source.get_quote(row.symbol()).and_then(|outcome| {
                outcome.quote().validate()?;
                Ok(outcome)
            });

            match resolved {
                Ok(outcome) => {
                    self.renderer
                        .apply(row, previous_price, outcome.quote(), Instant::now());
                    match outcome {
                        QuoteOutcome::Live(_) => report.live += 1,
                        QuoteOutcome::Fallback { .. } => report.simulated += 1,
                    }
                    debug!(
                        "[{}] {} {}",
                        row.symbol(),
                        row.price_text(),
                        row.change_text()
                    );
                }
                Err(e) => {
                    warn!("[{}] Quote unavailable: {}", row.symbol(), e);
                    self.renderer.apply_unavailable(row);
                    report.unavailable += 1;
                }
            }

            row.set_updating(false);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::TrackedRow;
    use crate::source::testing::{FailingRemote, ScriptedRemote};
    use crate::source::{FetchError, QuoteProvider};
    use std::time::Duration;
    use watchlist_common::format::{ChangeClass, SIMULATED_MARKER, parse_displayed_price};
    use watchlist_common::symbols::RowMarkup;
    use watchlist_common::{FallbackTable, Quote, Result, WatchlistError};

    fn watchlist(symbols: &[&str]) -> Watchlist {
        Watchlist::from_markup(symbols.iter().map(|s| RowMarkup::placeholder(s)).collect()).unwrap()
    }

    fn offline_updater() -> WatchlistUpdater<QuoteProvider<FailingRemote>> {
        WatchlistUpdater::new(
            QuoteProvider::new(
                FailingRemote(FetchError::Unreachable("offline".into())),
                FallbackTable::default(),
            ),
            Renderer::default(),
        )
    }

    fn assert_fully_rendered(row: &TrackedRow) {
        assert!(row.is_live());
        assert!(!row.is_updating());
        assert!(row.last_rendered_price().is_some(), "{:?}", row);
        assert!(row.change_text().ends_with('%') || row.change_text().ends_with(SIMULATED_MARKER));
    }

    /// Source that errors for chosen symbols and otherwise serves fixed quotes.
    struct FlakySource {
        broken: Vec<&'static str>,
    }

    impl QuoteSource for FlakySource {
        fn get_quote(&mut self, symbol: &str) -> Result<QuoteOutcome> {
            if self.broken.iter().any(|broken| *broken == symbol) {
                return Err(WatchlistError::Format("boom".into()));
            }
            Ok(QuoteOutcome::Live(Quote::live(symbol, 50.0, -0.5)))
        }
    }

    #[test]
    fn offline_reliance_renders_simulated_quote() {
        let mut rows = watchlist(&["RELIANCE"]);
        let report = offline_updater().refresh_all(&mut rows);
        assert_eq!(report, CycleReport { live: 0, simulated: 1, unavailable: 0 });

        let row = rows.get("RELIANCE").unwrap();
        let price = parse_displayed_price(row.price_text()).unwrap();
        assert!((price - 2650.4).abs() <= 2650.4 * 0.002 + 0.01, "{}", price);
        assert!(row.change_text().ends_with("(sim)"));
        assert!(!row.is_ticking(Instant::now()));
    }

    #[test]
    fn repeated_offline_cycles_stay_valid() {
        let mut rows = watchlist(&["NIFTY", "BANKNIFTY", "RELIANCE", "TCS", "INFY"]);
        let mut updater = offline_updater();

        for _ in 0..2 {
            let report = updater.refresh_all(&mut rows);
            assert_eq!(report.simulated, 5);
            assert_eq!(report.total(), rows.len());
            rows.rows().iter().for_each(assert_fully_rendered);
        }
    }

    #[test]
    fn rows_are_resolved_in_display_order() {
        let remote = ScriptedRemote::with(&[("B", 2.0, 0.1), ("C", 3.0, 0.0)]);
        let mut updater = WatchlistUpdater::new(
            QuoteProvider::new(remote, FallbackTable::default()),
            Renderer::default(),
        );
        let mut rows = watchlist(&["C", "A", "B"]);

        let report = updater.refresh_all(&mut rows);
        assert_eq!(report, CycleReport { live: 2, simulated: 1, unavailable: 0 });
        assert!(rows.get("A").unwrap().change_text().ends_with("(sim)"));
        assert_eq!(rows.get("B").unwrap().price_text(), "2.00");

        updater.refresh_all(&mut rows);
        let calls = updater.source().remote().calls.borrow().clone();
        assert_eq!(calls, ["C", "A", "B", "C", "A", "B"]);
    }

    #[test]
    fn failing_row_does_not_stop_the_pass() {
        let mut rows = watchlist(&["A", "B", "C"]);
        let mut updater = WatchlistUpdater::new(FlakySource { broken: vec!["B"] }, Renderer::default());

        let report = updater.refresh_all(&mut rows);
        assert_eq!(report, CycleReport { live: 2, simulated: 0, unavailable: 1 });

        let broken = rows.get("B").unwrap();
        assert_eq!(broken.change_text(), "Data unavailable");
        assert_eq!(broken.change_class(), None);
        assert!(!broken.is_updating());

        for symbol in ["A", "C"] {
            let row = rows.get(symbol).unwrap();
            assert_eq!(row.price_text(), "50.00");
            assert_eq!(row.change_text(), "-0.50%");
            assert_eq!(row.change_class(), Some(ChangeClass::Negative));
        }
    }

    #[test]
    fn non_finite_quote_renders_unavailable() {
        struct NanSource;
        impl QuoteSource for NanSource {
            fn get_quote(&mut self, symbol: &str) -> Result<QuoteOutcome> {
                Ok(QuoteOutcome::Live(Quote::live(symbol, f64::NAN, 0.0)))
            }
        }

        let mut rows = watchlist(&["A"]);
        let report = WatchlistUpdater::new(NanSource, Renderer::default()).refresh_all(&mut rows);
        assert_eq!(report.unavailable, 1);
        assert_eq!(rows.get("A").unwrap().change_text(), "Data unavailable");
        assert_eq!(rows.get("A").unwrap().price_text(), "--");
    }

    #[test]
    fn price_move_between_cycles_ticks() {
        struct Stepping(f64);
        impl QuoteSource for Stepping {
            fn get_quote(&mut self, symbol: &str) -> Result<QuoteOutcome> {
                Ok(QuoteOutcome::Live(Quote::live(symbol, self.0, 0.0)))
            }
        }

        let mut rows = watchlist(&["X"]);
        let mut updater = WatchlistUpdater::new(Stepping(100.0), Renderer::default());
        updater.refresh_all(&mut rows);
        assert!(!rows.get("X").unwrap().is_ticking(Instant::now()));

        updater.refresh_all(&mut rows);
        assert!(!rows.get("X").unwrap().is_ticking(Instant::now()));

        updater.source.0 = 101.0;
        updater.refresh_all(&mut rows);
        let row = rows.get("X").unwrap();
        assert!(row.is_ticking(Instant::now()));
        assert!(!row.is_ticking(Instant::now() + Duration::from_millis(200)));
    }

    #[test]
    fn empty_watchlist_is_a_no_op() {
        let mut rows = Watchlist::default();
        let report = offline_updater().refresh_all(&mut rows);
        assert_eq!(report.total(), 0);
    }
}
