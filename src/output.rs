//! Output formatting module for pjstat
//!
//! Formatters for displaying practice reports in two formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and chart frontends
//!
//! # Examples
//!
//! ```
//! use pjstat::output::get_formatter;
//! use pjstat_core::series::SumSeriesData;
//!
//! let recent = SumSeriesData {
//!     labels: vec!["Th".into(), "Fr".into()],
//!     values: vec![45.0, 30.0],
//!     total: 75.0,
//!     active_buckets: 2,
//! };
//!
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_recent(&recent));
//!
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_recent(&recent));
//! ```

use crate::aggregation::PracticeReport;
use pjstat_core::series::{MeanSeriesData, SumSeriesData};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;

/// Full month names for the yearly table
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the last-7-days series
    fn format_recent(&self, series: &SumSeriesData) -> String;

    /// Format the current-month series
    fn format_month(&self, series: &SumSeriesData) -> String;

    /// Format the current-year series
    fn format_year(&self, series: &SumSeriesData) -> String;

    /// Format the per-weekday trend
    fn format_weekday(&self, trend: &MeanSeriesData) -> String;

    /// Format the per-time-of-day trend
    fn format_time_of_day(&self, trend: &MeanSeriesData) -> String;

    /// Format the combined report
    fn format_report(&self, report: &PracticeReport) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new() -> Self {
        Self
    }

    /// Format a minute count as "1h 30m" / "45m"
    fn format_minutes(minutes: f64) -> String {
        let total = minutes.round() as u64;
        let hours = total / 60;
        let rest = total % 60;
        if hours > 0 {
            format!("{hours}h {rest}m")
        } else {
            format!("{rest}m")
        }
    }

    /// Format a bucket mean, "-" when no data exists
    fn format_mean(value: Option<f64>) -> String {
        match value {
            Some(minutes) => format!("{minutes:.1}m"),
            None => "-".to_string(),
        }
    }

    /// Sum-series table with a TOTAL row and a per-active-bucket average
    fn sum_table<'a>(
        value_title: &str,
        average_title: &str,
        rows: impl Iterator<Item = (String, &'a f64)>,
        series: &SumSeriesData,
    ) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> value_title, b -> "Practice"]);

        for (label, value) in rows {
            table.add_row(row![label, r -> Self::format_minutes(*value)]);
        }

        // Separator
        table.add_row(Row::new(vec![Cell::new(""); 2]));

        table.add_row(row![b -> "TOTAL", br -> Self::format_minutes(series.total)]);
        if let Some(average) = series.average_per_active_bucket() {
            table.add_row(row![b -> average_title, br -> Self::format_minutes(average)]);
        }

        table.to_string()
    }

    /// Mean-series table
    fn mean_table(title: &str, trend: &MeanSeriesData) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> title, b -> "Avg session"]);

        for (label, value) in trend.labels.iter().zip(&trend.values) {
            table.add_row(row![label, r -> Self::format_mean(*value)]);
        }

        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_recent(&self, series: &SumSeriesData) -> String {
        let rows = series
            .labels
            .iter()
            .cloned()
            .zip(&series.values);
        Self::sum_table("Day", "PER ACTIVE DAY", rows, series)
    }

    fn format_month(&self, series: &SumSeriesData) -> String {
        // Month labels are sparse chart labels; the table shows day numbers
        let rows = series
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("{}", index + 1), value));
        Self::sum_table("Day of Month", "PER ACTIVE DAY", rows, series)
    }

    fn format_year(&self, series: &SumSeriesData) -> String {
        let rows = series
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| (MONTH_NAMES[index % 12].to_string(), value));
        Self::sum_table("Month", "PER ACTIVE MONTH", rows, series)
    }

    fn format_weekday(&self, trend: &MeanSeriesData) -> String {
        Self::mean_table("Weekday", trend)
    }

    fn format_time_of_day(&self, trend: &MeanSeriesData) -> String {
        Self::mean_table("Starts", trend)
    }

    fn format_report(&self, report: &PracticeReport) -> String {
        let mut output = String::new();
        output.push_str("=== Last 7 days ===\n");
        output.push_str(&self.format_recent(&report.recent));
        output.push_str("\n=== This month ===\n");
        output.push_str(&self.format_month(&report.monthly));
        output.push_str("\n=== This year ===\n");
        output.push_str(&self.format_year(&report.yearly));
        output.push_str("\n=== By weekday ===\n");
        output.push_str(&self.format_weekday(&report.by_weekday));
        output.push_str("\n=== By time of day ===\n");
        output.push_str(&self.format_time_of_day(&report.by_time_of_day));
        output
    }
}

/// JSON formatter for machine-readable output
///
/// Emits the series exactly as a chart frontend consumes them: parallel
/// `labels`/`values` arrays, a minute total, and the active-bucket count
/// for the sum series. Trend buckets with no data serialize as `null`.
pub struct JsonFormatter;

impl JsonFormatter {
    fn sum_json(series: &SumSeriesData, active_key: &str) -> serde_json::Value {
        json!({
            "labels": series.labels,
            "values": series.values,
            "total_minutes": series.total,
            active_key: series.active_buckets,
        })
    }

    fn mean_json(trend: &MeanSeriesData) -> serde_json::Value {
        json!({
            "labels": trend.labels,
            "values": trend.values,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_recent(&self, series: &SumSeriesData) -> String {
        let output = json!({ "recent": Self::sum_json(series, "active_days") });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_month(&self, series: &SumSeriesData) -> String {
        let output = json!({ "monthly": Self::sum_json(series, "active_days") });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_year(&self, series: &SumSeriesData) -> String {
        let output = json!({ "yearly": Self::sum_json(series, "active_months") });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_weekday(&self, trend: &MeanSeriesData) -> String {
        let output = json!({ "by_weekday": Self::mean_json(trend) });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_time_of_day(&self, trend: &MeanSeriesData) -> String {
        let output = json!({ "by_time_of_day": Self::mean_json(trend) });
        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_report(&self, report: &PracticeReport) -> String {
        let output = json!({
            "recent": Self::sum_json(&report.recent, "active_days"),
            "monthly": Self::sum_json(&report.monthly, "active_days"),
            "yearly": Self::sum_json(&report.yearly, "active_months"),
            "by_weekday": Self::mean_json(&report.by_weekday),
            "by_time_of_day": Self::mean_json(&report.by_time_of_day),
        });
        serde_json::to_string_pretty(&output).unwrap()
    }
}

/// Get the formatter for the requested output mode
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
