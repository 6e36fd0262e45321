mod cli;
mod spider;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// install a stdout subscriber at `trace_level`
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    let config = cli.config(spider::optional_var("USER_AGENT"));
    let today = chrono::Local::now().date_naive();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `mentions run`: refresh tickers if stale, then scrape subreddits
        Run { force_update, .. } => spider::run(&config, force_update, today, tui).await?,

        // `mentions update`: refresh tickers
        Update => spider::update(&config, today, tui).await?,

        // `mentions status`: catalog age & size
        Status => spider::status(&config, today).await,
    }

    Ok(())
}
