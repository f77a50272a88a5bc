//! pjstat - practice journal statistics from local JSONL session logs

use clap::Parser;
use pjstat::{
    aggregation::Aggregator,
    cli::{Cli, Command, parse_date_filter},
    data_loader::DataLoader,
    error::Result,
    filters::SessionFilter,
    output::get_formatter,
    timezone::TimezoneConfig,
    types::DailyDate,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. --verbose raises the level; RUST_LOG wins when set.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("pjstat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pjstat=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());

    let tz_config = TimezoneConfig::from_flags(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let aggregator = Aggregator::new(tz_config, cli.clock).with_progress(show_progress);

    let today = match &cli.as_of {
        Some(date_str) => DailyDate::new(parse_date_filter(date_str)?),
        None => aggregator.today(),
    };

    let mut session_filter = SessionFilter::new();
    if let Some(since_str) = &cli.since {
        session_filter = session_filter.with_since(parse_date_filter(since_str)?);
    }
    if let Some(until_str) = &cli.until {
        session_filter = session_filter.with_until(parse_date_filter(until_str)?);
    }
    if let Some(instrument) = &cli.instrument {
        session_filter = session_filter.with_instrument(instrument.clone());
    }
    session_filter = session_filter.with_timezone(aggregator.timezone_config().tz);

    let data_loader = DataLoader::new().await?;
    info!("Loading sessions from {} directories", data_loader.paths().len());

    let sessions = data_loader.load_sessions();
    let filtered_sessions = session_filter.filter_stream(sessions).await;

    let report = aggregator.practice_report(filtered_sessions, today).await?;

    let formatter = get_formatter(cli.json);
    let output = match cli.command.unwrap_or(Command::Report) {
        Command::Recent => formatter.format_recent(&report.recent),
        Command::Month => formatter.format_month(&report.monthly),
        Command::Year => formatter.format_year(&report.yearly),
        Command::Weekday => formatter.format_weekday(&report.by_weekday),
        Command::TimeOfDay => formatter.format_time_of_day(&report.by_time_of_day),
        Command::Report => formatter.format_report(&report),
    };
    println!("{output}");

    Ok(())
}
