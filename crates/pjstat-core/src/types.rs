//! Core domain types for pjstat
//!
//! This module contains the fundamental types used throughout the pjstat
//! library: calendar bucket keys, timestamps, the clock-format preference,
//! and the practice-session record parsed from journal exports.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO timestamp wrapper for UTC timestamps
///
/// Provides a strongly-typed wrapper around chrono's `DateTime<Utc>` with
/// serialization support and conversion into the calendar bucket keys used
/// for aggregation.
///
/// # Examples
/// ```
/// use pjstat_core::types::ISOTimestamp;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
/// let timestamp = ISOTimestamp::new(dt);
///
/// let daily = timestamp.to_daily_date();
/// assert_eq!(daily.format("%Y-%m-%d"), "2024-03-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ISOTimestamp(DateTime<Utc>);

impl ISOTimestamp {
    /// Create a new ISOTimestamp
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner DateTime
    pub fn inner(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Convert to DailyDate using UTC
    pub fn to_daily_date(&self) -> DailyDate {
        DailyDate::new(self.0.date_naive())
    }

    /// Convert to DailyDate using the specified timezone
    pub fn to_daily_date_with_tz(&self, tz: &Tz) -> DailyDate {
        DailyDate::new(self.0.with_timezone(tz).date_naive())
    }
}

impl AsRef<DateTime<Utc>> for ISOTimestamp {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

/// Daily date bucket key
///
/// Represents a calendar date without time information, used as the bucket
/// key for the daily practice series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// The month this date falls in
    pub fn month(&self) -> MonthDate {
        MonthDate::from_date(&self.0)
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

/// Calendar month bucket key
///
/// A year/month pair without day information, used as the bucket key for
/// the yearly practice series.
///
/// # Examples
/// ```
/// use pjstat_core::types::MonthDate;
/// use chrono::NaiveDate;
///
/// let month = MonthDate::from_date(&NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// assert_eq!(month, MonthDate::new(2024, 3));
/// assert_eq!(month.to_string(), "2024-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDate {
    year: i32,
    month: u32,
}

impl MonthDate {
    /// Create a new MonthDate; `month` is 1-based
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing the given date
    pub fn from_date(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Three-hour time-of-day bucket key
///
/// The day is split into 8 slots: slot `i` covers start hours
/// `[3i, 3i + 3)`. Sessions are bucketed by their start hour.
///
/// # Examples
/// ```
/// use pjstat_core::types::TimeSlot;
///
/// assert_eq!(TimeSlot::from_hour(0), TimeSlot::new(0));
/// assert_eq!(TimeSlot::from_hour(11), TimeSlot::new(3));
/// assert_eq!(TimeSlot::from_hour(23).start_hour(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Number of slots in a day
    pub const SLOTS: usize = 8;

    /// Create a slot from its index (0..8)
    pub fn new(index: u8) -> Self {
        Self(index)
    }

    /// The slot containing the given hour of day (0..24)
    pub fn from_hour(hour: u32) -> Self {
        Self((hour / 3) as u8)
    }

    /// Slot index (0..8)
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// First hour covered by this slot
    pub fn start_hour(&self) -> u32 {
        u32::from(self.0) * 3
    }
}

/// Clock-format preference for time-of-day labels
///
/// Controls whether time-of-day slot labels are rendered as 24-hour start
/// hours ("0", "3", ..., "21") or 12-hour with an am/pm suffix ("12am",
/// "3am", ..., "9pm"). This is an explicit parameter of the aggregator,
/// threaded through from the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockFormat {
    /// 24-hour labels
    #[default]
    TwentyFourHour,
    /// 12-hour labels with am/pm suffix
    TwelveHour,
}

impl fmt::Display for ClockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyFourHour => write!(f, "24h"),
            Self::TwelveHour => write!(f, "12h"),
        }
    }
}

impl std::str::FromStr for ClockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "24h" | "24" => Ok(Self::TwentyFourHour),
            "12h" | "12" => Ok(Self::TwelveHour),
            _ => Err(format!("Invalid clock format: {s} (expected 12h or 24h)")),
        }
    }
}

/// Raw journal entry from a JSONL export
///
/// Practice journal exports carry more fields than the reports need
/// (end time, mood rating, notes, soft-delete flag). Rows are validated
/// into [`PracticeSession`] via [`PracticeSession::from_raw`]; rows that
/// cannot be validated are skipped, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawJournalEntry {
    /// Session start timestamp, RFC 3339
    pub start: String,
    /// Session end timestamp, RFC 3339 (optional)
    #[serde(default)]
    pub end: Option<String>,
    /// Minutes practiced, as recorded by the journal
    #[serde(rename = "practiceTime", default)]
    pub practice_time: Option<u64>,
    /// Instrument or profile name
    #[serde(default)]
    pub instrument: Option<String>,
    /// Mood rating recorded with the session
    #[serde(default)]
    pub mood: Option<u8>,
    /// Free-form session notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Soft-delete flag
    #[serde(default)]
    pub deleted: Option<bool>,
}

/// A validated practice session
///
/// The unit record folded into the statistics series: when the session
/// started and how many minutes were practiced, plus the instrument it was
/// logged under (used only for filtering).
///
/// # Examples
/// ```
/// use pjstat_core::types::{ISOTimestamp, PracticeSession};
/// use chrono::{TimeZone, Utc};
///
/// let session = PracticeSession {
///     start_time: ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()),
///     minutes: 30,
///     instrument: Some("Piano".to_string()),
/// };
///
/// let json = serde_json::to_string(&session).unwrap();
/// let back: PracticeSession = serde_json::from_str(&json).unwrap();
/// assert_eq!(back.minutes, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    /// When the session began
    pub start_time: ISOTimestamp,
    /// Minutes practiced
    pub minutes: u64,
    /// Instrument the session was logged under (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
}

impl PracticeSession {
    /// Validate a raw journal entry
    ///
    /// Skips soft-deleted rows and rows whose start timestamp does not
    /// parse. When the journal did not record an explicit minute count,
    /// the duration is derived from the start/end pair; rows with neither
    /// are skipped.
    pub fn from_raw(raw: RawJournalEntry) -> Option<Self> {
        if raw.deleted.unwrap_or(false) {
            tracing::debug!("Skipping soft-deleted journal entry");
            return None;
        }

        let start = match DateTime::parse_from_rfc3339(&raw.start) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => {
                tracing::debug!("Skipping entry with unparseable start: {}", raw.start);
                return None;
            }
        };

        let minutes = match raw.practice_time {
            Some(minutes) => minutes,
            None => {
                let end = DateTime::parse_from_rfc3339(raw.end.as_deref()?)
                    .ok()?
                    .with_timezone(&Utc);
                let elapsed = end.signed_duration_since(start).num_minutes();
                if elapsed < 0 {
                    tracing::debug!("Skipping entry that ends before it starts");
                    return None;
                }
                elapsed as u64
            }
        };

        Some(Self {
            start_time: ISOTimestamp::new(start),
            minutes,
            instrument: raw.instrument,
        })
    }
}
