use crate::api::TickerSource;
use crate::error::Error;
use crate::{fs, tui, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Freshness marker, holding the date of the last catalog refresh.
pub const MARKER_FILE: &str = "last_updated.txt";

const DATE_FORMAT: &str = "%Y-%m-%d";

// freshness
// ----------------------------------------------------------------------------

/// True if `dir` exists and its freshness marker is at most `max_age_days` away from
/// `today`. A missing directory, or a missing or unparseable marker, counts as stale.
pub async fn is_fresh(dir: &Path, max_age_days: i64, today: NaiveDate) -> bool {
    if !is_dir(dir).await {
        debug!("exchange data folder {} doesn't exist", dir.display());
        return false;
    }

    let Some(last_updated) = marker_date(dir).await else {
        debug!("no readable freshness marker in {}", dir.display());
        return false;
    };

    let age = (today - last_updated).num_days().abs();
    if age > max_age_days {
        debug!("listed stocks are {age} days old (> {max_age_days})");
        return false;
    }

    debug!("exchange data up-to-date, last updated {last_updated}");
    true
}

/// The date stored in the freshness marker of `dir`, if there is a valid one.
pub async fn marker_date(dir: &Path) -> Option<NaiveDate> {
    let text = tokio::fs::read_to_string(dir.join(MARKER_FILE)).await.ok()?;
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

// update
// ----------------------------------------------------------------------------

/// Fetches the tickers of every exchange, writes one CSV per exchange into `dir`, then
/// records `today` in the freshness marker and deletes the older dated files of the
/// updated exchanges. The first failure aborts the update, leaving the marker and the
/// older files untouched.
pub async fn update<S: TickerSource>(
    source: &S,
    dir: &Path,
    exchanges: &[String],
    today: NaiveDate,
    tui: bool,
) -> Result<Vec<PathBuf>> {
    let time = std::time::Instant::now();

    let mut written = Vec::with_capacity(exchanges.len());
    for exchange in exchanges {
        info!("updating tickers for {exchange}");
        let pb = tui::spinner(tui, format!("updating tickers for {exchange} ..."));

        let tickers = source.exchange_tickers(exchange).await?;
        let path = exchange_file(dir, exchange, today);
        fs::write_csv(&path, &tickers).await?;
        trace!("{} tickers written to {}", tickers.len(), path.display());

        tui::finish(
            tui,
            pb,
            format!("updating tickers for {exchange} ... {} tickers", tickers.len()),
        );
        written.push(path);
    }

    let marker = dir.join(MARKER_FILE);
    fs::write_text(&marker, &today.format(DATE_FORMAT).to_string()).await?;

    for (exchange, path) in exchanges.iter().zip(&written) {
        prune(dir, exchange, path).await?;
    }

    info!("exchange tickers updated. {}", crate::time_elapsed(time));
    Ok(written)
}

/// `{dir}/{EXCHANGE}_{YYYY-MM-DD}.csv`
pub fn exchange_file(dir: &Path, exchange: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{exchange}_{}.csv", date.format(DATE_FORMAT)))
}

// delete every `{exchange}_{date}.csv` in `dir` other than `keep`
async fn prune(dir: &Path, exchange: &str, keep: &Path) -> Result<()> {
    let prefix = format!("{exchange}_");
    for file in fs::list_files(dir, "csv").await? {
        if file == keep {
            continue;
        }
        let dated = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.strip_prefix(&prefix))
            .is_some_and(|date| NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok());
        if dated {
            debug!("removing outdated exchange file {}", file.display());
            fs::remove_file(&file).await?;
        }
    }
    Ok(())
}

// load
// ----------------------------------------------------------------------------

/// The tickers valid for mention filtering.
///
/// `symbols` keeps one entry per listing, so a ticker on two exchanges appears twice;
/// membership goes through a set.
#[derive(Clone, Debug, Default)]
pub struct TickerCatalog {
    symbols: Vec<String>,
    members: HashSet<String>,
}

impl TickerCatalog {
    /// Reads the `ticker` column of every `.csv` file in `dir`.
    pub async fn load(dir: &Path) -> Result<Self> {
        let time = std::time::Instant::now();

        if !is_dir(dir).await {
            return Err(Error::CatalogUnavailable {
                path: dir.to_path_buf(),
                reason: "exchange data folder doesn't exist",
            });
        }

        let files = fs::list_files(dir, "csv").await?;
        if files.is_empty() {
            return Err(Error::CatalogUnavailable {
                path: dir.to_path_buf(),
                reason: "no exchange files found",
            });
        }

        let mut symbols = Vec::new();
        for file in &files {
            let column = fs::read_csv_column(file, "ticker").await?;
            trace!("{} tickers read from {}", column.len(), file.display());
            symbols.extend(column);
        }

        let catalog = Self::from_symbols(symbols);
        debug!(
            "{} tickers loaded from {} files. {}",
            catalog.len(),
            files.len(),
            crate::time_elapsed(time)
        );
        Ok(catalog)
    }

    /// Trims each symbol, drops empty ones and sorts the rest.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbols: Vec<String> = symbols
            .into_iter()
            .map(|symbol| symbol.as_ref().trim().to_string())
            .filter(|symbol| !symbol.is_empty())
            .collect();
        symbols.sort();

        let members = symbols.iter().cloned().collect();
        Self { symbols, members }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.members.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
