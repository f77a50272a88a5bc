//! Core types, series accumulators, and utilities for pjstat
//!
//! This crate provides the domain types (sessions, calendar bucket keys),
//! the ordered-bucket accumulators behind every report series, error
//! handling, and timezone configuration used by the pjstat CLI.

pub mod error;
pub mod series;
pub mod timezone;
pub mod types;

// Re-export commonly used types
pub use error::{PjstatError, Result};
pub use series::{MeanSeries, MeanSeriesData, SumSeries, SumSeriesData};
pub use types::{
    ClockFormat, DailyDate, ISOTimestamp, MonthDate, PracticeSession, RawJournalEntry, TimeSlot,
};
