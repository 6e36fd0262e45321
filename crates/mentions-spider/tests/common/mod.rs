#![allow(dead_code)]

use mentions_spider::reddit::{Comment, CommentNode, Thread};
use mentions_spider::stock::ExchangeTicker;
use mentions_spider::{
    ContentSource, Error, Provider, ProviderFailure, Result, TickerSource, TimeWindow,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Ticker-data provider serving fixed listings; unknown exchanges fail.
#[derive(Default)]
pub struct FakeExchanges {
    listings: HashMap<String, Vec<ExchangeTicker>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeExchanges {
    pub fn with(mut self, exchange: &str, tickers: &[&str]) -> Self {
        self.listings.insert(
            exchange.to_string(),
            tickers.iter().map(|t| ExchangeTicker::new(*t)).collect(),
        );
        self
    }
}

impl TickerSource for FakeExchanges {
    async fn exchange_tickers(&self, exchange: &str) -> Result<Vec<ExchangeTicker>> {
        self.requested.lock().unwrap().push(exchange.to_string());
        self.listings
            .get(exchange)
            .cloned()
            .ok_or_else(|| Error::ProviderRequestFailed {
                provider: Provider::TickerData,
                target: format!("exchange {exchange}"),
                failure: ProviderFailure::Malformed("unknown exchange".into()),
            })
    }
}

/// Content provider serving fixed threads; subreddits marked failing are rate limited.
#[derive(Default)]
pub struct FakeReddit {
    subreddits: HashMap<String, Vec<(Thread, Vec<CommentNode>)>>,
    failing: HashSet<String>,
    pub listed: Mutex<Vec<(String, TimeWindow, usize)>>,
}

impl FakeReddit {
    pub fn with_thread(mut self, subreddit: &str, id: &str, tree: Vec<CommentNode>) -> Self {
        let thread = Thread {
            id: id.to_string(),
            title: format!("thread {id}"),
        };
        self.subreddits
            .entry(subreddit.to_string())
            .or_default()
            .push((thread, tree));
        self
    }

    pub fn failing(mut self, subreddit: &str) -> Self {
        self.failing.insert(subreddit.to_string());
        self
    }
}

impl ContentSource for FakeReddit {
    async fn top_threads(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Thread>> {
        self.listed
            .lock()
            .unwrap()
            .push((subreddit.to_string(), window, limit));

        if self.failing.contains(subreddit) {
            return Err(Error::ProviderRequestFailed {
                provider: Provider::Content,
                target: format!("r/{subreddit}"),
                failure: ProviderFailure::RateLimited,
            });
        }

        Ok(self
            .subreddits
            .get(subreddit)
            .map(|threads| {
                threads
                    .iter()
                    .take(limit)
                    .map(|(thread, _)| thread.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn comment_tree(&self, subreddit: &str, thread: &Thread) -> Result<Vec<CommentNode>> {
        Ok(self
            .subreddits
            .get(subreddit)
            .and_then(|threads| threads.iter().find(|(t, _)| t.id == thread.id))
            .map(|(_, tree)| tree.clone())
            .unwrap_or_default())
    }
}

pub fn comment(body: &str, created_utc: i64, replies: Vec<CommentNode>) -> CommentNode {
    CommentNode::Comment(Comment::new(body, created_utc).with_replies(replies))
}

// stub http server
// ----------------------------------------------------------------------------

/// One request received by a [`StubServer`].
#[derive(Clone, Debug)]
pub struct Recorded {
    /// e.g. `GET /stock?exchanges=NASDAQ`
    pub line: String,
    /// Header block, lowercased.
    pub head: String,
    pub body: String,
}

/// Local HTTP server answering each connection with the next scripted `(status, body)`,
/// then `404 {}` once the script runs out.
pub struct StubServer {
    pub url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub async fn start(script: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let recorded = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&recorded);
        let mut script = VecDeque::from(script);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let Some(request) = read_request(&mut stream).await else {
                    continue;
                };
                log.lock().unwrap().push(request);

                let (status, body) = script.pop_front().unwrap_or((404, "{}".to_string()));
                let response = format!(
                    "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, recorded }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// Request lines, with the `HTTP/1.1` suffix dropped.
    pub fn lines(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.line).collect()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let line = head.lines().next().unwrap_or_default();
    let line = line.trim_end_matches(" HTTP/1.1").to_string();
    let body = String::from_utf8_lossy(&buf[body_start.min(buf.len())..]).to_string();

    Some(Recorded {
        line,
        head: head.to_lowercase(),
        body,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
