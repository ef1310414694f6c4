//! Applying quotes to rows.
//!
//! Price text, change text and change class are always written together from
//! one quote. A price move starts a short tick that expires on its own.

use std::time::{Duration, Instant};

use watchlist_common::Quote;
use watchlist_common::format::{
    ChangeClass, NumberLocale, UNAVAILABLE_TEXT, format_change, format_price,
};
use watchlist_common::net::TICK_DURATION_MS;

use crate::row::TrackedRow;

/// Rendering settings for watchlist rows.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    locale: NumberLocale,
    tick_duration: Duration,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(
            NumberLocale::default(),
            Duration::from_millis(TICK_DURATION_MS),
        )
    }
}

impl Renderer {
    /// Renderer grouping prices per `locale` and ticking for `tick_duration`.
    pub fn new(locale: NumberLocale, tick_duration: Duration) -> Self {
        Self {
            locale,
            tick_duration,
        }
    }

    /// Write `quote` into `row`.
    ///
    /// `previous_price` is what the row showed before this cycle; the row ticks
    /// when it was a valid number different from the new price.
    pub fn apply(
        &self,
        row: &mut TrackedRow,
        previous_price: Option<f64>,
        quote: &Quote,
        now: Instant,
    ) {
        row.set_price_text(format_price(quote.price, self.locale));
        row.set_change(
            format_change(quote.change_percent, quote.simulated),
            ChangeClass::from_change(quote.change_percent),
        );

        if previous_price.is_some_and(|previous| previous != quote.price) {
            row.start_tick(now + self.tick_duration);
        }
    }

    /// Mark `row` as having no data this cycle. The price text is left untouched.
    pub fn apply_unavailable(&self, row: &mut TrackedRow) {
        row.set_change(UNAVAILABLE_TEXT.to_string(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_price_change_and_class_together() {
        let renderer = Renderer::default();
        let mut row = TrackedRow::new("TCS", "--", "--");

        renderer.apply(&mut row, None, &Quote::live("TCS", 3540.2, -1.5), Instant::now());
        assert_eq!(row.price_text(), "3,540.20");
        assert_eq!(row.change_text(), "-1.50%");
        assert_eq!(row.change_class(), Some(ChangeClass::Negative));

        renderer.apply(&mut row, Some(3540.2), &Quote::simulated("TCS", 3541.0, 0.33), Instant::now());
        assert_eq!(row.change_text(), "+0.33% (sim)");
        assert_eq!(row.change_class(), Some(ChangeClass::Positive));

        renderer.apply(&mut row, Some(3541.0), &Quote::live("TCS", 3541.0, 0.0), Instant::now());
        assert_eq!(row.change_text(), "0.00%");
        assert_eq!(row.change_class(), None);
    }

    #[test]
    fn uses_configured_locale() {
        let renderer = Renderer::new(NumberLocale::Western, Duration::from_millis(180));
        let mut row = TrackedRow::new("BIG", "--", "--");
        renderer.apply(&mut row, None, &Quote::live("BIG", 123456.78, 0.1), Instant::now());
        assert_eq!(row.price_text(), "123,456.78");
    }

    #[test]
    fn unchanged_price_does_not_tick() {
        let renderer = Renderer::default();
        let now = Instant::now();
        let mut row = TrackedRow::new("X", "100.00", "--");

        let previous = row.last_rendered_price();
        renderer.apply(&mut row, previous, &Quote::live("X", 100.0, 0.0), now);
        assert!(!row.is_ticking(now));
    }

    #[test]
    fn changed_price_ticks_then_clears() {
        let renderer = Renderer::default();
        let now = Instant::now();
        let mut row = TrackedRow::new("X", "100.00", "--");

        let previous = row.last_rendered_price();
        renderer.apply(&mut row, previous, &Quote::live("X", 101.0, 1.0), now);
        assert!(row.is_ticking(now));
        assert!(!row.is_ticking(now + Duration::from_millis(TICK_DURATION_MS)));
    }

    #[test]
    fn first_render_does_not_tick() {
        let renderer = Renderer::default();
        let now = Instant::now();
        let mut row = TrackedRow::new("X", "--", "--");
        let previous = row.last_rendered_price();
        renderer.apply(&mut row, previous, &Quote::live("X", 101.0, 1.0), now);
        assert!(!row.is_ticking(now));
    }

    #[test]
    fn unavailable_clears_class_only() {
        let renderer = Renderer::default();
        let mut row = TrackedRow::new("X", "--", "--");
        renderer.apply(&mut row, None, &Quote::live("X", 10.0, 2.0), Instant::now());

        renderer.apply_unavailable(&mut row);
        assert_eq!(row.change_text(), "Data unavailable");
        assert_eq!(row.change_class(), None);
        assert_eq!(row.price_text(), "10.00");
    }
}
