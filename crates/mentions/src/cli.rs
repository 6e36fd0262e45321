use clap::{Args, Parser, Subcommand, ValueEnum};
use mentions_spider::config::{
    Config, DEFAULT_BLACKLIST, DEFAULT_EXCHANGES, DEFAULT_SUBREDDITS,
};
use mentions_spider::TimeWindow;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    ///
    /// Without a trace level, progress is shown with spinners instead.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,

    /// Folder holding the exchange ticker files and the freshness marker.
    #[arg(long, global = true, default_value = "exchange_data")]
    pub exchange_dir: PathBuf,

    /// Folder the mention series is written to.
    #[arg(long, global = true, default_value = "output")]
    pub output_dir: PathBuf,

    /// Exchanges to collect tickers from.
    #[arg(long, global = true, value_delimiter = ',', default_values_t = DEFAULT_EXCHANGES.map(String::from))]
    pub exchanges: Vec<String>,

    /// Days before the ticker catalog counts as stale.
    #[arg(long, global = true, default_value_t = 7)]
    pub max_age_days: i64,

    /// Per-request timeout, in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Retries after a network error, rate limit or server error.
    #[arg(long, global = true, default_value_t = 2)]
    pub retries: u32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh the ticker catalog if stale, scan subreddits and save the mention series.
    Run {
        #[command(flatten)]
        scan: ScanArgs,

        /// Refresh the ticker catalog even if it is fresh.
        #[arg(long)]
        force_update: bool,
    },

    /// Refresh the ticker catalog regardless of its age.
    Update,

    /// Report the age and size of the ticker catalog.
    Status,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Subreddits to scan.
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_SUBREDDITS.map(String::from))]
    pub subreddits: Vec<String>,

    /// Recency of the top threads.
    #[arg(short, long, default_value = "day")]
    pub window: Window,

    /// Top threads per subreddit.
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,

    /// Tokens never counted as mentions.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_BLACKLIST.map(String::from))]
    pub blacklist: Vec<String>,

    /// Write the mentions of the subreddits that succeeded, even if others fail.
    #[arg(short, long)]
    pub keep_going: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Window {
    All,
    Day,
    Hour,
    Month,
    Week,
    Year,
}

impl From<Window> for TimeWindow {
    fn from(window: Window) -> Self {
        match window {
            Window::All => TimeWindow::All,
            Window::Day => TimeWindow::Day,
            Window::Hour => TimeWindow::Hour,
            Window::Month => TimeWindow::Month,
            Window::Week => TimeWindow::Week,
            Window::Year => TimeWindow::Year,
        }
    }
}

impl Cli {
    /// Runtime configuration from the command line; `user_agent` comes from the environment.
    pub fn config(&self, user_agent: Option<String>) -> Config {
        let mut config = Config::default();

        config.storage.exchange_dir = self.exchange_dir.clone();
        config.storage.output_dir = self.output_dir.clone();
        config.exchanges = self.exchanges.clone();
        config.max_age_days = self.max_age_days;
        config.http.timeout = Duration::from_secs(self.timeout);
        config.http.retries = self.retries;
        if let Some(user_agent) = user_agent {
            config.http.user_agent = user_agent;
        }

        if let Commands::Run { scan, .. } = &self.command {
            config.subreddits = scan.subreddits.clone();
            config.window = scan.window.into();
            config.limit = scan.limit;
            config.blacklist = scan.blacklist.clone();
            config.keep_going = scan.keep_going;
        }

        config
    }
}
