//! Where quotes come from.
//!
//! `HttpPriceSource` asks the remote endpoint; `QuoteProvider` wraps any
//! `RemoteSource` and substitutes a simulated quote from the `FallbackTable`
//! whenever the remote fails, tagging the outcome with the failure cause.

use std::time::Duration;

use log::debug;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use thiserror::Error;
use watchlist_common::net::SYMBOL_QUERY_PARAM;
use watchlist_common::quote::PriceResponse;
use watchlist_common::{FallbackTable, Quote, Result, WatchlistError};

/// Why a remote lookup did not produce a quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or body transfer failure.
    #[error("price endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-success status.
    #[error("price endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not `{ "price": number, "changePercent": number }`.
    #[error("malformed price response: {0}")]
    Malformed(String),
}

/// Remote price lookup for a single symbol.
pub trait RemoteSource {
    /// Fetch a fresh, non-simulated quote for `symbol`.
    fn fetch_remote(&self, symbol: &str) -> Result<Quote, FetchError>;
}

/// Quote together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// Quote served by the remote endpoint.
    Live(Quote),
    /// Simulated quote used because the remote failed.
    Fallback {
        /// The simulated quote.
        quote: Quote,
        /// Why the remote was not used.
        cause: FetchError,
    },
}

impl QuoteOutcome {
    /// The quote, whichever branch produced it.
    pub fn quote(&self) -> &Quote {
        match self {
            QuoteOutcome::Live(quote) => quote,
            QuoteOutcome::Fallback { quote, .. } => quote,
        }
    }

    /// Failure cause for fallback outcomes.
    pub fn cause(&self) -> Option<&FetchError> {
        match self {
            QuoteOutcome::Live(_) => None,
            QuoteOutcome::Fallback { cause, .. } => Some(cause),
        }
    }
}

/// Anything the updater can ask for a quote.
///
/// An `Err` means the row cannot be updated this cycle and is shown as unavailable.
pub trait QuoteSource {
    /// Resolve a quote for `symbol`.
    fn get_quote(&mut self, symbol: &str) -> Result<QuoteOutcome>;
}

/// Remote endpoint queried as `GET <endpoint>?symbol=<symbol>` with caching disabled.
pub struct HttpPriceSource {
    client: Client,
    endpoint: Url,
}

impl HttpPriceSource {
    /// Build a source for `endpoint`; `timeout` overrides the HTTP client default.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| WatchlistError::Format(format!("Invalid endpoint {}: {}", endpoint, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WatchlistError::Format(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint the source queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl RemoteSource for HttpPriceSource {
    fn fetch_remote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[(SYMBOL_QUERY_PARAM, symbol)])
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;
        let price = PriceResponse::from_json_bytes(&body)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        Ok(price.into_quote(symbol))
    }
}

/// Remote lookup with a simulated fallback that cannot fail.
pub struct QuoteProvider<R> {
    remote: R,
    fallback: FallbackTable,
}

impl<R: RemoteSource> QuoteProvider<R> {
    /// Wrap `remote`, falling back to `fallback` prices.
    pub fn new(remote: R, fallback: FallbackTable) -> Self {
        Self { remote, fallback }
    }

    /// Wrapped remote source.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fallback table in use.
    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    /// Quote for `symbol` from the remote, or a simulated one tagged with the cause.
    pub fn fetch(&self, symbol: &str) -> QuoteOutcome {
        match self.remote.fetch_remote(symbol) {
            Ok(quote) => QuoteOutcome::Live(quote),
            Err(cause) => {
                debug!("[{}] Using simulated quote: {}", symbol, cause);
                QuoteOutcome::Fallback {
                    quote: self.fallback.simulate(symbol),
                    cause,
                }
            }
        }
    }
}

impl<R: RemoteSource> QuoteSource for QuoteProvider<R> {
    fn get_quote(&mut self, symbol: &str) -> Result<QuoteOutcome> {
        Ok(self.fetch(symbol))
    }
}
