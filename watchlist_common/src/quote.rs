//! Quote data model and the remote price body schema.
//!
//! A `Quote` is one priced observation for a symbol: the last price, the signed
//! percentage change, whether it was simulated locally, and a millisecond UTC
//! timestamp. `PriceResponse` is the JSON body the remote endpoint returns.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::WatchlistError;

/// Market quote for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol identifier.
    pub symbol: String,
    /// Last price in currency units.
    pub price: f64,
    /// Signed percentage change.
    pub change_percent: f64,
    /// `true` when produced by the local fallback generator.
    pub simulated: bool,
    /// UTC timestamp in milliseconds since Unix epoch.
    pub timestamp: u64,
}

impl Quote {
    /// Quote observed from the remote endpoint.
    pub fn live(symbol: &str, price: f64, change_percent: f64) -> Self {
        Self::observed(symbol, price, change_percent, false)
    }

    /// Quote produced locally while the remote endpoint is unavailable.
    pub fn simulated(symbol: &str, price: f64, change_percent: f64) -> Self {
        Self::observed(symbol, price, change_percent, true)
    }

    fn observed(symbol: &str, price: f64, change_percent: f64, simulated: bool) -> Self {
        Quote {
            symbol: symbol.to_string(),
            price,
            change_percent,
            simulated,
            timestamp: epoch_millis(Utc::now().timestamp_millis()),
        }
    }

    /// Rejects quotes whose numbers cannot be displayed.
    pub fn validate(&self) -> Result<(), WatchlistError> {
        if !self.price.is_finite() {
            return Err(WatchlistError::InvalidQuote {
                symbol: self.symbol.clone(),
                reason: format!("price is not finite: {}", self.price),
            });
        }
        if !self.change_percent.is_finite() {
            return Err(WatchlistError::InvalidQuote {
                symbol: self.symbol.clone(),
                reason: format!("change is not finite: {}", self.change_percent),
            });
        }
        Ok(())
    }
}

/// Milliseconds since the Unix epoch, clamped to zero for pre-epoch clocks.
fn epoch_millis(millis: i64) -> u64 {
    u64::try_from(millis).unwrap_or(0)
}

/// Success body of the remote price endpoint: `{ "price": number, "changePercent": number }`.
///
/// Unknown fields are ignored; a missing or non-numeric field fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    /// Last price.
    pub price: f64,
    /// Signed percentage change.
    pub change_percent: f64,
}

impl PriceResponse {
    /// Decode a response body.
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, WatchlistError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Turn the body into a live quote for `symbol`.
    pub fn into_quote(self, symbol: &str) -> Quote {
        Quote::live(symbol, self.price, self.change_percent)
    }
}
