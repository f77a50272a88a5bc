//! CLI interface for pjstat
//!
//! Defines the command-line interface using clap. Each subcommand prints
//! one report series; with no subcommand the combined report is shown.
//!
//! # Example
//!
//! ```bash
//! # Last-7-days practice summary
//! pjstat recent
//!
//! # This year's totals as JSON, bucketed in Tokyo time
//! pjstat year --json --timezone Asia/Tokyo
//!
//! # Weekday averages for one instrument, 12-hour labels
//! pjstat weekday --instrument Piano --clock 12h
//! ```

use clap::{Parser, Subcommand};
use pjstat_core::error::{PjstatError, Result};
use pjstat_core::types::ClockFormat;

/// Practice journal statistics from local JSONL session logs
#[derive(Parser, Debug, Clone)]
#[command(name = "pjstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Only include sessions on or after this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Only include sessions on or before this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Only include sessions logged under this instrument
    #[arg(long, short = 'i', global = true)]
    pub instrument: Option<String>,

    /// Timezone for date bucketing (e.g. "America/New_York", "Asia/Tokyo", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for date bucketing (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Clock format for time-of-day labels (12h or 24h)
    #[arg(long, default_value = "24h", global = true)]
    pub clock: ClockFormat,

    /// Reference date for the reporting windows (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show daily practice over the last 7 days
    Recent,
    /// Show daily practice over the current month
    Month,
    /// Show monthly practice over the current year
    Year,
    /// Show average session length per weekday
    Weekday,
    /// Show average session length per time of day
    TimeOfDay,
    /// Show the combined report (default)
    Report,
}

/// Parse a date filter from a string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format. For YYYY-MM, the first
/// day of the month is used.
///
/// # Example
///
/// ```
/// use pjstat::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-03-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-03").unwrap();
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| PjstatError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| PjstatError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(PjstatError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PjstatError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(PjstatError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["pjstat", "--json"]);
        assert!(cli.json);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["pjstat", "recent"]);
        assert!(matches!(cli.command, Some(Command::Recent)));

        let cli = Cli::parse_from(["pjstat", "weekday", "--instrument", "Piano"]);
        assert!(matches!(cli.command, Some(Command::Weekday)));
        assert_eq!(cli.instrument.as_deref(), Some("Piano"));
    }

    #[test]
    fn test_clock_flag() {
        let cli = Cli::parse_from(["pjstat", "time-of-day", "--clock", "12h"]);
        assert!(matches!(cli.command, Some(Command::TimeOfDay)));
        assert_eq!(cli.clock, ClockFormat::TwelveHour);

        let cli = Cli::parse_from(["pjstat"]);
        assert_eq!(cli.clock, ClockFormat::TwentyFourHour);
    }

    #[test]
    fn test_timezone_flags() {
        let cli = Cli::parse_from(["pjstat", "month", "--timezone", "Asia/Tokyo"]);
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));

        let cli = Cli::parse_from(["pjstat", "month", "--utc"]);
        assert!(cli.utc);
    }

    #[test]
    fn test_date_parsing() {
        let date = parse_date_filter("2024-03-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 15);

        let date = parse_date_filter("2024-03").unwrap();
        assert_eq!(date.day(), 1);

        assert!(parse_date_filter("invalid").is_err());
        assert!(parse_date_filter("2024-13").is_err());
        assert!(parse_date_filter("2024").is_err());
    }
}
