use crate::config::TimeWindow;
use crate::reddit::{CommentNode, Thread};
use crate::stock::ExchangeTicker;
use crate::Result;

/// Spider API calls are made up of the following components:
/// 1. HTTP
///     a) client
///     b) request
///     c) deserializer
///     d) OPTIONAL: transformation
///
/// 2. Storage
///     a) CSV / JSON files under the configured roots
///
/// The traits below are the HTTP half; stages take them as generics so tests can
/// stand in for the real providers.
#[allow(async_fn_in_trait)]
pub trait TickerSource {
    /// Every ticker currently listed on `exchange`.
    async fn exchange_tickers(&self, exchange: &str) -> Result<Vec<ExchangeTicker>>;
}

#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// The top `limit` threads of `subreddit` within `window`, in listing order.
    async fn top_threads(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Thread>>;

    /// The comment tree of `thread`, "load more" placeholders included.
    async fn comment_tree(&self, subreddit: &str, thread: &Thread) -> Result<Vec<CommentNode>>;
}
