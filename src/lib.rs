//! pjstat - practice journal statistics from local JSONL session logs
//!
//! This library provides functionality to:
//! - Discover and stream practice-session logs from journal export directories
//! - Aggregate sessions into five chart-ready report series (last 7 days,
//!   current month, current year, per-weekday and per-time-of-day averages)
//! - Filter sessions by date range and instrument
//! - Render reports as tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use pjstat::{
//!     aggregation::Aggregator,
//!     data_loader::DataLoader,
//!     timezone::TimezoneConfig,
//!     types::ClockFormat,
//! };
//!
//! #[tokio::main]
//! async fn main() -> pjstat::Result<()> {
//!     let data_loader = DataLoader::new().await?;
//!     let aggregator = Aggregator::new(TimezoneConfig::default(), ClockFormat::default());
//!
//!     let sessions = data_loader.load_sessions();
//!     let report = aggregator.practice_report(sessions, aggregator.today()).await?;
//!
//!     println!("{} minutes in the last 7 days", report.recent.total);
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod filters;
pub mod output;

// Re-export the core crate's modules and common types
pub use pjstat_core::{error, series, timezone, types};
pub use pjstat_core::{PjstatError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
