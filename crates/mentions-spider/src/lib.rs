pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod mentions;
pub mod reddit;
pub mod stock;

pub(crate) mod http;
pub(crate) mod tui;

pub use api::{ContentSource, TickerSource};
pub use config::{Config, HttpConfig, Storage, TimeWindow};
pub use error::{Error, Provider, ProviderFailure, Result, StorageFailure};

/// Formats the time elapsed since `time` for debug logs.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!(
        "\x1b[38;5;208melapsed time: {} ms\x1b[0m",
        time.elapsed().as_millis()
    )
}
