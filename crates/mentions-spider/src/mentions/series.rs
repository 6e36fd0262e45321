use crate::{fs, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One mention of `ticker` at `timestamp` (seconds since the epoch, UTC).
///
/// Serialized as a `[ticker, timestamp]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, i64)", into = "(String, i64)")]
pub struct MentionEvent {
    pub ticker: String,
    pub timestamp: i64,
}

impl MentionEvent {
    pub fn new(ticker: impl Into<String>, timestamp: i64) -> Self {
        Self {
            ticker: ticker.into(),
            timestamp,
        }
    }
}

impl From<(String, i64)> for MentionEvent {
    fn from((ticker, timestamp): (String, i64)) -> Self {
        Self { ticker, timestamp }
    }
}

impl From<MentionEvent> for (String, i64) {
    fn from(event: MentionEvent) -> Self {
        (event.ticker, event.timestamp)
    }
}

/// Subreddit name to its mentions. Subreddits keep the order they were scanned in, and
/// each subreddit's mentions keep scan order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionSeries(IndexMap<String, Vec<MentionEvent>>);

impl MentionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mentions of `subreddit`, replacing any earlier ones in place.
    pub fn insert(&mut self, subreddit: impl Into<String>, events: Vec<MentionEvent>) {
        self.0.insert(subreddit.into(), events);
    }

    pub fn get(&self, subreddit: &str) -> Option<&[MentionEvent]> {
        self.0.get(subreddit).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MentionEvent])> {
        self.0.iter().map(|(sub, events)| (sub.as_str(), events.as_slice()))
    }

    /// Number of subreddits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mentions across every subreddit.
    pub fn total_mentions(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        fs::write_json(path, self).await
    }

    pub async fn load(path: &Path) -> Result<Self> {
        fs::read_json(path).await
    }
}

/// `{dir}/ticker_series_{YYYY-MM-DD}.json`
pub fn output_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("ticker_series_{}.json", date.format("%Y-%m-%d")))
}
