//! Shared endpoint and scheduling constants.

/// Remote price endpoint queried as `GET <endpoint>?symbol=<symbol>`.
pub const DEFAULT_PRICE_ENDPOINT: &str = "https://example.com/api/price";
/// Query parameter carrying the symbol.
pub const SYMBOL_QUERY_PARAM: &str = "symbol";
/// Fixed interval between refresh cycles, in milliseconds.
pub const REFRESH_INTERVAL_MS: u64 = 15_000;
/// How long a row keeps its tick marker after a price change, in milliseconds.
pub const TICK_DURATION_MS: u64 = 180;
/// Text shown in price/change fields before the first update.
pub const PLACEHOLDER_TEXT: &str = "--";
