use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_EXCHANGES: [&str; 4] = ["NASDAQ", "NYSE", "AMEX", "TSX"];

pub const DEFAULT_SUBREDDITS: [&str; 4] =
    ["wallstreetbets", "stocks", "investing", "smallstreetbets"];

/// Common acronyms that collide with listed tickers.
pub const DEFAULT_BLACKLIST: [&str; 11] = [
    "A", "I", "DD", "WSB", "YOLO", "RH", "EV", "PE", "ETH", "BTC", "E",
];

/// Everything a run needs, injected into each stage.
#[derive(Clone, Debug)]
pub struct Config {
    pub storage: Storage,
    pub exchanges: Vec<String>,
    pub subreddits: Vec<String>,
    pub window: TimeWindow,
    /// Number of top threads to scan per subreddit.
    pub limit: usize,
    /// The ticker catalog is stale when older than this many days.
    pub max_age_days: i64,
    pub blacklist: Vec<String>,
    pub http: HttpConfig,
    /// Record failing subreddits and carry on instead of aborting the run.
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: Storage::default(),
            exchanges: DEFAULT_EXCHANGES.iter().map(|e| e.to_string()).collect(),
            subreddits: DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            window: TimeWindow::Day,
            limit: 100,
            max_age_days: 7,
            blacklist: DEFAULT_BLACKLIST.iter().map(|b| b.to_string()).collect(),
            http: HttpConfig::default(),
            keep_going: false,
        }
    }
}

/// Storage roots for exchange data and run output.
#[derive(Clone, Debug)]
pub struct Storage {
    pub exchange_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            exchange_dir: PathBuf::from("exchange_data"),
            output_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Extra attempts after a network error, 429 or 5xx.
    pub retries: u32,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retries: 2,
            user_agent: concat!("mentions-spider/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Recency filter applied to a subreddit's top listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    #[default]
    All,
    Day,
    Hour,
    Month,
    Week,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::All,
        TimeWindow::Day,
        TimeWindow::Hour,
        TimeWindow::Month,
        TimeWindow::Week,
        TimeWindow::Year,
    ];

    /// The value of reddit's `t` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Day => "day",
            TimeWindow::Hour => "hour",
            TimeWindow::Month => "month",
            TimeWindow::Week => "week",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|window| window.as_str() == s)
            .ok_or_else(|| format!("unknown time window `{s}`"))
    }
}
