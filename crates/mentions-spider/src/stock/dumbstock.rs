use crate::api::TickerSource;
use crate::config::HttpConfig;
use crate::error::{Error, Provider};
use crate::http::{self, HttpClient};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

const BASE_URL: &str = "https://dumbstockapi.com";

/// Client for the dumbstockapi ticker listing.
pub struct DumbStockApi {
    client: HttpClient,
    base_url: String,
    retries: u32,
}

impl DumbStockApi {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Self::with_base_url(config, BASE_URL)
    }

    pub fn with_base_url(config: &HttpConfig, base_url: impl Into<String>) -> Result<Self> {
        let client = http::build_client(config)
            .map_err(|err| Error::provider(Provider::TickerData, "client", err))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            retries: config.retries,
        })
    }
}

impl TickerSource for DumbStockApi {
    async fn exchange_tickers(&self, exchange: &str) -> Result<Vec<ExchangeTicker>> {
        let url = format!("{}/stock", self.base_url);
        trace!("fetching tickers for {exchange} from {url}");

        let tickers: Vec<ExchangeTicker> = http::send_json(self.retries, || {
            self.client.get(&url).query(&[("exchanges", exchange)])
        })
        .await
        .map_err(|err| {
            error!("failed to fetch {exchange} tickers, error({err})");
            Error::provider(Provider::TickerData, format!("exchange {exchange}"), err)
        })?;

        debug!("{} tickers fetched for {exchange}", tickers.len());
        Ok(tickers)
    }
}

// de
// ----------------------------------------------------------------------------
//
//  [
//      {
//          "ticker": "AAPL",
//          "name": "Apple Inc",
//          "is_etf": null,
//          "exchange": "NASDAQ"
//      },
//      ...
//  ]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExchangeTicker {
    pub ticker: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub is_etf: Option<bool>,

    #[serde(default)]
    pub exchange: Option<String>,
}

impl ExchangeTicker {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: None,
            is_etf: None,
            exchange: None,
        }
    }
}
