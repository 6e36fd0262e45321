use super::MentionEvent;
use crate::stock::TickerCatalog;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // a letter followed by any non-whitespace, cut back to the last word boundary:
    // "$TSLA," -> "TSLA", "BRK.A" -> "BRK.A"
    static ref TOKEN: Regex = Regex::new(r"\b[A-Za-z]\S*\b").expect("valid token pattern");
}

/// Every ticker-like token of `text`, in order.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN.find_iter(text).map(|m| m.as_str())
}

/// Filters tokens against a blacklist and the ticker catalog. Matching is exact-case.
pub struct MentionExtractor<'c> {
    catalog: &'c TickerCatalog,
    blacklist: HashSet<String>,
}

impl<'c> MentionExtractor<'c> {
    pub fn new<I, S>(catalog: &'c TickerCatalog, blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog,
            blacklist: blacklist.into_iter().map(Into::into).collect(),
        }
    }

    /// Tickers mentioned in `text`, repeats included.
    pub fn tickers<'t>(&self, text: &'t str) -> Vec<&'t str> {
        tokens(text)
            .filter(|token| !self.blacklist.contains(*token))
            .filter(|token| self.catalog.contains(token))
            .collect()
    }

    /// Pairs each ticker mentioned in `text` with `timestamp`.
    pub fn mentions(&self, text: &str, timestamp: i64) -> Vec<MentionEvent> {
        self.tickers(text)
            .into_iter()
            .map(|ticker| MentionEvent::new(ticker, timestamp))
            .collect()
    }
}
