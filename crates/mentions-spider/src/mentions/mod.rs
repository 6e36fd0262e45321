/// Ticker tokens in free text.
pub mod extract;

/// Subreddit scans, single and sequential over many.
pub mod scan;

/// The per-subreddit time series written at the end of a run.
pub mod series;

pub use extract::MentionExtractor;
pub use scan::{scan_subreddit, scan_subreddits, ScanOptions, ScanReport};
pub use series::{MentionEvent, MentionSeries};
