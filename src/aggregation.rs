//! Aggregation module for practice-session statistics
//!
//! This module turns a stream of practice sessions into the five
//! chart-ready report series: daily sums for the last 7 days, the current
//! month, and the current year, plus per-weekday and per-time-of-day
//! averages.
//!
//! Every series is pre-populated with its full reporting window before any
//! session is folded in, so empty days and months still appear as zero
//! buckets. Sessions outside a window are dropped by the accumulators
//! themselves; there is no separate range check in the fold.
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
//! # async fn example() -> pjstat::Result<()> {
//! let aggregator = Aggregator::new(TimezoneConfig::default(), ClockFormat::default());
//!
//! let data_loader = DataLoader::new().await?;
//! let sessions = data_loader.load_sessions();
//!
//! let report = aggregator.practice_report(sessions, aggregator.today()).await?;
//! println!("practiced {} minutes this week", report.recent.total);
//! # Ok(())
//! # }
//! ```

use chrono::{Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use futures::stream::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use pjstat_core::error::Result;
use pjstat_core::series::{MeanSeries, MeanSeriesData, SumSeries, SumSeriesData};
use pjstat_core::timezone::TimezoneConfig;
use pjstat_core::types::{ClockFormat, DailyDate, MonthDate, PracticeSession, TimeSlot};
use serde::{Deserialize, Serialize};

/// Two-letter weekday labels, Monday first
const WEEKDAY_ABBREV: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// One-letter month labels for the yearly axis
const MONTH_LETTERS: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

/// Weekday keys in axis order
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One full practice report
///
/// Output of a single aggregation run. Each series carries parallel
/// `labels`/`values` vectors in axis order; the sum series additionally
/// carry a total and the count of active buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeReport {
    /// Daily sums over the 7 days ending on the reference date
    pub recent: SumSeriesData,
    /// Daily sums over the month containing the reference date
    pub monthly: SumSeriesData,
    /// Monthly sums over the year containing the reference date
    pub yearly: SumSeriesData,
    /// Average session length per weekday, Monday first
    pub by_weekday: MeanSeriesData,
    /// Average session length per 3-hour start slot
    pub by_time_of_day: MeanSeriesData,
}

/// Main aggregation engine
pub struct Aggregator {
    timezone_config: TimezoneConfig,
    clock: ClockFormat,
    show_progress: bool,
}

impl Aggregator {
    /// Create a new Aggregator
    pub fn new(timezone_config: TimezoneConfig, clock: ClockFormat) -> Self {
        Self {
            timezone_config,
            clock,
            show_progress: false,
        }
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Get the timezone configuration
    pub fn timezone_config(&self) -> &TimezoneConfig {
        &self.timezone_config
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> DailyDate {
        DailyDate::new(Utc::now().with_timezone(&self.timezone_config.tz).date_naive())
    }

    /// Compute the full practice report for a stream of sessions
    ///
    /// Total over its input: any session stream (including an empty one)
    /// and any reference date produce a fully-populated report. Session
    /// contents are folded as-is; validation belongs to the loader.
    pub async fn practice_report(
        &self,
        sessions: impl Stream<Item = Result<PracticeSession>>,
        today: DailyDate,
    ) -> Result<PracticeReport> {
        let mut recent = Self::recent_window(today);
        let mut monthly = Self::month_window(today);
        let mut yearly = Self::year_window(today);
        let mut by_weekday = Self::weekday_trend();
        let mut by_time_of_day = Self::time_of_day_trend(self.clock);

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} sessions processed")
                    .unwrap(),
            );
            pb.set_message("Aggregating practice sessions");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut count = 0u64;

        tokio::pin!(sessions);
        while let Some(result) = sessions.next().await {
            let session = result?;
            let local = session.start_time.inner().with_timezone(&self.timezone_config.tz);
            let day = DailyDate::new(local.date_naive());
            let minutes = session.minutes as f64;

            recent.add(day, minutes);
            monthly.add(day, minutes);
            yearly.add(day.month(), minutes);
            by_weekday.observe(local.weekday(), minutes);
            by_time_of_day.observe(TimeSlot::from_hour(local.hour()), minutes);

            count += 1;
            if let Some(ref pb) = progress {
                pb.set_position(count);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Aggregated {count} sessions"));
        }

        Ok(PracticeReport {
            recent: recent.into_data(),
            monthly: monthly.into_data(),
            yearly: yearly.into_data(),
            by_weekday: by_weekday.into_data(),
            by_time_of_day: by_time_of_day.into_data(),
        })
    }

    /// The 7 days ending on `today`, oldest first, labeled by weekday
    fn recent_window(today: DailyDate) -> SumSeries<DailyDate> {
        let mut series = SumSeries::new();
        for offset in 0..7 {
            let date = *today.inner() - Duration::days(6 - offset);
            series.add_bucket(DailyDate::new(date), 0.0, weekday_abbrev(date.weekday()));
        }
        series
    }

    /// Every day of the month containing `today`
    ///
    /// Labels are sparse to keep the axis readable: the first day carries
    /// "month/day", every 6th day and the last day carry the day number,
    /// the rest are blank.
    fn month_window(today: DailyDate) -> SumSeries<DailyDate> {
        let (year, month) = (today.inner().year(), today.inner().month());
        let days = days_in_month(year, month);

        let mut series = SumSeries::new();
        for index in 0..days {
            let date = NaiveDate::from_ymd_opt(year, month, index + 1)
                .expect("day index stays within the month");
            let label = if index == 0 {
                format!("{}/{}", month, index + 1)
            } else if index % 6 == 0 || index == days - 1 {
                format!("{}", index + 1)
            } else {
                String::new()
            };
            series.add_bucket(DailyDate::new(date), 0.0, label);
        }
        series
    }

    /// The 12 months of the year containing `today`
    fn year_window(today: DailyDate) -> SumSeries<MonthDate> {
        let year = today.inner().year();
        let mut series = SumSeries::new();
        for month in 1..=12u32 {
            series.add_bucket(
                MonthDate::new(year, month),
                0.0,
                MONTH_LETTERS[(month - 1) as usize],
            );
        }
        series
    }

    /// The 7 weekday buckets, Monday first
    fn weekday_trend() -> MeanSeries<Weekday> {
        let mut series = MeanSeries::new();
        for day in WEEKDAYS {
            series.add_bucket(day, weekday_abbrev(day));
        }
        series
    }

    /// The 8 three-hour start-time buckets
    fn time_of_day_trend(clock: ClockFormat) -> MeanSeries<TimeSlot> {
        let mut series = MeanSeries::new();
        for index in 0..TimeSlot::SLOTS as u8 {
            let slot = TimeSlot::new(index);
            series.add_bucket(slot, slot_label(slot, clock));
        }
        series
    }
}

/// Two-letter abbreviation for a weekday
fn weekday_abbrev(day: Weekday) -> &'static str {
    WEEKDAY_ABBREV[day.num_days_from_monday() as usize]
}

/// Label for a time-of-day slot in the requested clock format
fn slot_label(slot: TimeSlot, clock: ClockFormat) -> String {
    let hour = slot.start_hour();
    match clock {
        ClockFormat::TwentyFourHour => hour.to_string(),
        ClockFormat::TwelveHour => match hour {
            0 => "12am".to_string(),
            h if h < 12 => format!("{h}am"),
            12 => "12pm".to_string(),
            h => format!("{}pm", h - 12),
        },
    }
}

/// Number of days in the given month
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("month comes from a valid date");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first day of the following month is always valid");
    next.signed_duration_since(first).num_days() as u32
}
