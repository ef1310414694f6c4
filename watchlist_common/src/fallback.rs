//! Local price simulation used when the remote endpoint is unreachable.
//!
//! The `FallbackTable` maps symbols to a base price. A simulated quote nudges the
//! base by a change sampled uniformly from `[-0.2%, +0.2%]`; symbols missing from
//! the table use a base of `100`.

use std::collections::HashMap;
use std::io::Read;

use rand::Rng;

use crate::error::WatchlistError;
use crate::quote::Quote;

/// Base price for symbols missing from the table.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;
/// Largest absolute change, in percent, a simulated quote may carry.
pub const MAX_SIMULATED_CHANGE_PERCENT: f64 = 0.2;

const BUILTIN_BASE_PRICES: [(&str, f64); 4] = [
    ("NIFTY", 21430.5),
    ("BANKNIFTY", 45230.1),
    ("RELIANCE", 2650.4),
    ("TCS", 3540.2),
];

/// Static mapping from symbol to base price.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTable {
    base_prices: HashMap<String, f64>,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self {
            base_prices: BUILTIN_BASE_PRICES
                .iter()
                .map(|(symbol, base)| (symbol.to_string(), *base))
                .collect(),
        }
    }
}

impl FallbackTable {
    /// Table without any known symbol; every lookup yields [`DEFAULT_BASE_PRICE`].
    pub fn empty() -> Self {
        Self {
            base_prices: HashMap::new(),
        }
    }

    /// Add or replace the base price of `symbol`.
    pub fn insert(&mut self, symbol: &str, base: f64) -> Result<(), WatchlistError> {
        if !base.is_finite() || base <= 0.0 {
            return Err(WatchlistError::Format(format!(
                "base price for {} must be a positive number, got {}",
                symbol, base
            )));
        }
        self.base_prices.insert(symbol.to_string(), base);
        Ok(())
    }

    /// Merge a JSON object of `{"SYMBOL": base}` entries over the current table.
    pub fn merge_json<R: Read>(&mut self, reader: R) -> Result<(), WatchlistError> {
        let overrides: HashMap<String, f64> = serde_json::from_reader(reader)?;
        for (symbol, base) in overrides {
            self.insert(symbol.trim(), base)?;
        }
        Ok(())
    }

    /// Whether `symbol` has its own base price.
    pub fn contains(&self, symbol: &str) -> bool {
        self.base_prices.contains_key(symbol)
    }

    /// Base price for `symbol`, falling back to [`DEFAULT_BASE_PRICE`].
    pub fn base_price(&self, symbol: &str) -> f64 {
        self.base_prices
            .get(symbol)
            .copied()
            .unwrap_or(DEFAULT_BASE_PRICE)
    }

    /// Produce a simulated quote for `symbol` using the thread-local RNG.
    pub fn simulate(&self, symbol: &str) -> Quote {
        self.simulate_with(symbol, &mut rand::rng())
    }

    /// Produce a simulated quote for `symbol` drawing the change from `rng`.
    ///
    /// `price = base * (1 + change / 100)`.
    pub fn simulate_with<R: Rng>(&self, symbol: &str, rng: &mut R) -> Quote {
        let base = self.base_price(symbol);
        let change_percent: f64 =
            rng.random_range(-MAX_SIMULATED_CHANGE_PERCENT..=MAX_SIMULATED_CHANGE_PERCENT);
        let price = base * (1.0 + change_percent / 100.0);
        Quote::simulated(symbol, price, change_percent)
    }
}
