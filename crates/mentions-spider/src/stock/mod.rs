/// Freshness, refresh and loading of the locally persisted ticker catalog.
pub mod catalog;

/// Listed tickers per exchange from [dumbstockapi].
///
/// [dumbstockapi]: https://dumbstockapi.com/
pub mod dumbstock;

pub use catalog::TickerCatalog;
pub use dumbstock::{DumbStockApi, ExchangeTicker};
