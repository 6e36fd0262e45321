use anyhow::Context;
use chrono::NaiveDate;
use dotenv::var;
use mentions_spider::mentions::{scan_subreddits, series, MentionExtractor, ScanOptions};
use mentions_spider::reddit::{Credentials, RedditClient};
use mentions_spider::stock::{catalog, DumbStockApi, TickerCatalog};
use mentions_spider::Config;
use tracing::{debug, info, warn};

/// Refresh the ticker catalog if needed, scan every subreddit and save the mention series.
pub(crate) async fn run(
    config: &Config,
    force_update: bool,
    today: NaiveDate,
    tui: bool,
) -> anyhow::Result<()> {
    let time = std::time::Instant::now();
    let exchange_dir = &config.storage.exchange_dir;

    // 1. make sure the ticker list is reasonably up-to-date
    if force_update || !catalog::is_fresh(exchange_dir, config.max_age_days, today).await {
        update(config, today, tui).await?;
    } else {
        debug!("ticker catalog up-to-date, skipping update");
    }

    let catalog = TickerCatalog::load(exchange_dir)
        .await
        .context("loading ticker catalog")?;
    info!("{} listed tickers loaded", catalog.len());

    // 2. scrape subreddits
    let credentials = credentials()?;
    let reddit = RedditClient::connect(&credentials, &config.http)
        .await
        .context("authenticating with reddit")?;

    let extractor = MentionExtractor::new(&catalog, config.blacklist.iter());
    let report = scan_subreddits(
        &reddit,
        &config.subreddits,
        &ScanOptions::from(config),
        &extractor,
        tui,
    )
    .await
    .context("scanning subreddits")?;

    // 3. save the series, partial or not
    let path = series::output_path(&config.storage.output_dir, today);
    info!("saving timeseries to {}", path.display());
    report
        .series
        .save(&path)
        .await
        .with_context(|| format!("writing mention series to {}", path.display()))?;

    if !report.is_complete() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|(subreddit, err)| format!("r/{subreddit}: {err}"))
            .collect();
        warn!("partial mention series written to {}", path.display());
        anyhow::bail!(
            "partial mention series written to {}; failed subreddits:\n  {}",
            path.display(),
            failed.join("\n  ")
        );
    }

    if tui {
        println!("mention series saved to {}", path.display());
    }
    info!(
        "spider finished collecting mentions, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}

/// Fetch the tickers of every configured exchange.
pub(crate) async fn update(config: &Config, today: NaiveDate, tui: bool) -> anyhow::Result<()> {
    let source = DumbStockApi::new(&config.http).context("updating ticker catalog")?;
    let files = catalog::update(
        &source,
        &config.storage.exchange_dir,
        &config.exchanges,
        today,
        tui,
    )
    .await
    .context("updating ticker catalog")?;

    info!("{} exchange files written", files.len());
    Ok(())
}

/// Print the freshness and size of the ticker catalog.
pub(crate) async fn status(config: &Config, today: NaiveDate) {
    let exchange_dir = &config.storage.exchange_dir;
    let fresh = catalog::is_fresh(exchange_dir, config.max_age_days, today).await;

    match catalog::marker_date(exchange_dir).await {
        Some(date) => println!(
            "last updated: {date} ({} days ago)",
            (today - date).num_days()
        ),
        None => println!("last updated: never"),
    }
    println!("fresh: {fresh} (max age {} days)", config.max_age_days);

    match TickerCatalog::load(exchange_dir).await {
        Ok(catalog) => println!("listed tickers: {}", catalog.len()),
        Err(err) => println!("listed tickers: none ({err})"),
    }
}

// credentials stay outside the spider; read from the environment or `.env`
fn credentials() -> anyhow::Result<Credentials> {
    Ok(Credentials {
        client_id: var("REDDIT_CLIENT_ID").context("environment variable REDDIT_CLIENT_ID")?,
        client_secret: var("REDDIT_CLIENT_SECRET")
            .context("environment variable REDDIT_CLIENT_SECRET")?,
        username: optional_var("REDDIT_USERNAME"),
        password: optional_var("REDDIT_PASSWORD"),
    })
}

// unset and blank count the same
pub(crate) fn optional_var(key: &str) -> Option<String> {
    var(key).ok().filter(|value| !value.trim().is_empty())
}
