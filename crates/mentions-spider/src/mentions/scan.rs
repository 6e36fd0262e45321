use super::{MentionEvent, MentionExtractor, MentionSeries};
use crate::api::ContentSource;
use crate::config::{Config, TimeWindow};
use crate::error::Error;
use crate::{reddit, tui, Result};
use tracing::{debug, error, info, trace, warn};

/// How each subreddit is scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub window: TimeWindow,
    /// Top threads per subreddit.
    pub limit: usize,
    /// Record a failing subreddit and move on to the next one.
    pub keep_going: bool,
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            window: config.window,
            limit: config.limit,
            keep_going: config.keep_going,
        }
    }
}

/// Outcome of a multi-subreddit scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub series: MentionSeries,
    /// Subreddits skipped under `keep_going`, with the error that stopped them.
    pub failures: Vec<(String, Error)>,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Scans the top threads of `subreddit`, returning every mention in thread order, then
/// comment order.
pub async fn scan_subreddit<C: ContentSource>(
    source: &C,
    subreddit: &str,
    window: TimeWindow,
    limit: usize,
    extractor: &MentionExtractor<'_>,
    tui: bool,
) -> Result<Vec<MentionEvent>> {
    let time = std::time::Instant::now();
    let pb = tui::spinner(tui, format!("listing r/{subreddit} ..."));

    let threads = source.top_threads(subreddit, window, limit).await?;

    let mut events = Vec::new();
    for (i, thread) in threads.iter().enumerate() {
        info!("{}", thread.title);
        pb.set_message(format!("scanning r/{subreddit} [{}/{}] ...", i + 1, threads.len()));

        let comments = reddit::flatten(source.comment_tree(subreddit, thread).await?);
        trace!("{} comments in thread {}", comments.len(), thread.id);

        for comment in &comments {
            events.extend(extractor.mentions(&comment.body, comment.created_utc));
        }
    }

    tui::finish(
        tui,
        pb,
        format!(
            "scanning r/{subreddit} ... {} mentions in {} threads",
            events.len(),
            threads.len()
        ),
    );
    debug!(
        "{} mentions found in r/{subreddit}. {}",
        events.len(),
        crate::time_elapsed(time)
    );
    Ok(events)
}

/// Scans each subreddit in turn.
///
/// The first failure aborts the scan, unless `options.keep_going` is set, in which case the
/// failing subreddit is left out of the series and listed in [`ScanReport::failures`].
pub async fn scan_subreddits<C: ContentSource>(
    source: &C,
    subreddits: &[String],
    options: &ScanOptions,
    extractor: &MentionExtractor<'_>,
    tui: bool,
) -> Result<ScanReport> {
    let time = std::time::Instant::now();
    let mut report = ScanReport::default();

    for subreddit in subreddits {
        info!("scraping subreddit: {subreddit} ...");
        let result = scan_subreddit(
            source,
            subreddit,
            options.window,
            options.limit,
            extractor,
            tui,
        )
        .await;

        match result {
            Ok(events) => report.series.insert(subreddit.as_str(), events),
            Err(err) if options.keep_going => {
                warn!("skipping r/{subreddit}, error({err})");
                report.failures.push((subreddit.clone(), err));
            }
            Err(err) => {
                error!("failed to scan r/{subreddit}, error({err})");
                return Err(err);
            }
        }
    }

    info!(
        "{} mentions collected from {} subreddits, time elapsed: {:?}",
        report.series.total_mentions(),
        report.series.len(),
        time.elapsed()
    );
    Ok(report)
}
