//! Property-based tests for pjstat using proptest

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use futures::stream;
use pjstat::{
    aggregation::Aggregator,
    timezone::TimezoneConfig,
    types::{ClockFormat, DailyDate, ISOTimestamp, PracticeSession},
};
use proptest::prelude::*;

// Strategies for generating test data

prop_compose! {
    fn arb_timestamp()(
        // 2024-01-01 to 2025-01-01
        secs in 1704067200i64..1735689600i64,
    ) -> ISOTimestamp {
        ISOTimestamp::new(Utc.timestamp_opt(secs, 0).unwrap())
    }
}

prop_compose! {
    fn arb_session()(
        start_time in arb_timestamp(),
        minutes in 0u64..600,
        instrument in prop::option::of(prop::sample::select(vec!["Piano", "Violin", "Cello"])),
    ) -> PracticeSession {
        PracticeSession {
            start_time,
            minutes,
            instrument: instrument.map(str::to_string),
        }
    }
}

fn reference_date() -> DailyDate {
    DailyDate::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn utc_aggregator() -> Aggregator {
    Aggregator::new(
        TimezoneConfig::from_flags(None, true).unwrap(),
        ClockFormat::default(),
    )
}

fn compute_report(sessions: Vec<PracticeSession>) -> pjstat::aggregation::PracticeReport {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let aggregator = utc_aggregator();
        let sessions_stream = stream::iter(sessions.into_iter().map(Ok));
        aggregator
            .practice_report(sessions_stream, reference_date())
            .await
            .unwrap()
    })
}

proptest! {
    #[test]
    fn test_report_is_always_complete(
        sessions in prop::collection::vec(arb_session(), 0..50)
    ) {
        let report = compute_report(sessions);

        prop_assert_eq!(report.recent.values.len(), 7);
        prop_assert_eq!(report.recent.labels.len(), 7);
        prop_assert_eq!(report.monthly.values.len(), 30); // June
        prop_assert_eq!(report.yearly.values.len(), 12);
        prop_assert_eq!(report.by_weekday.values.len(), 7);
        prop_assert_eq!(report.by_time_of_day.values.len(), 8);
    }

    #[test]
    fn test_recent_total_matches_manual_sum(
        sessions in prop::collection::vec(arb_session(), 0..50)
    ) {
        let window_start = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let window_end = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let expected: u64 = sessions
            .iter()
            .filter(|s| {
                let date = s.start_time.inner().date_naive();
                date >= window_start && date <= window_end
            })
            .map(|s| s.minutes)
            .sum();

        let report = compute_report(sessions);
        // Whole-minute sums are exact in f64 at these magnitudes
        prop_assert_eq!(report.recent.total, expected as f64);
    }

    #[test]
    fn test_total_equals_sum_of_values(
        sessions in prop::collection::vec(arb_session(), 0..50)
    ) {
        let report = compute_report(sessions);

        for series in [&report.recent, &report.monthly, &report.yearly] {
            let sum: f64 = series.values.iter().sum();
            prop_assert!((series.total - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_active_days_counts_distinct_practiced_days(
        sessions in prop::collection::vec(arb_session(), 0..50)
    ) {
        let window_start = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let window_end = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let expected = sessions
            .iter()
            .filter(|s| s.minutes > 0)
            .map(|s| s.start_time.inner().date_naive())
            .filter(|date| *date >= window_start && *date <= window_end)
            .collect::<std::collections::HashSet<_>>()
            .len();

        let report = compute_report(sessions);
        prop_assert_eq!(report.recent.active_buckets, expected);
    }

    #[test]
    fn test_weekday_means_match_naive_means(
        sessions in prop::collection::vec(arb_session(), 1..50)
    ) {
        let report = compute_report(sessions.clone());

        for (index, reported) in report.by_weekday.values.iter().enumerate() {
            let samples: Vec<f64> = sessions
                .iter()
                .filter(|s| {
                    s.start_time.inner().weekday().num_days_from_monday() as usize == index
                })
                .map(|s| s.minutes as f64)
                .collect();

            match reported {
                None => prop_assert!(samples.is_empty()),
                Some(mean) => {
                    let expected = samples.iter().sum::<f64>() / samples.len() as f64;
                    let tolerance = 1e-9 * expected.abs().max(1.0);
                    prop_assert!((mean - expected).abs() <= tolerance);
                }
            }
        }
    }

    #[test]
    fn test_weekday_means_independent_of_fold_order(
        sessions in prop::collection::vec(arb_session(), 1..50)
    ) {
        let forward = compute_report(sessions.clone());
        let mut reversed = sessions;
        reversed.reverse();
        let backward = compute_report(reversed);

        for (lhs, rhs) in forward.by_weekday.values.iter().zip(&backward.by_weekday.values) {
            match (lhs, rhs) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    let tolerance = 1e-9 * a.abs().max(b.abs()).max(1.0);
                    prop_assert!((a - b).abs() <= tolerance);
                }
                _ => prop_assert!(false, "fold order changed which buckets have data"),
            }
        }
    }

    #[test]
    fn test_session_serialization_roundtrip(
        session in arb_session()
    ) {
        let serialized = serde_json::to_string(&session).unwrap();
        let deserialized: PracticeSession = serde_json::from_str(&serialized).unwrap();

        prop_assert_eq!(session.start_time, deserialized.start_time);
        prop_assert_eq!(session.minutes, deserialized.minutes);
        prop_assert_eq!(session.instrument, deserialized.instrument);
    }

    #[test]
    fn test_date_filter_parsing_valid_formats(
        year in 2020i32..2030,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let date_str = format!("{year:04}-{month:02}-{day:02}");
        let result = pjstat::cli::parse_date_filter(&date_str);
        prop_assert!(result.is_ok());

        let parsed = result.unwrap();
        prop_assert_eq!(parsed.year(), year);
        prop_assert_eq!(parsed.month(), month);
        prop_assert_eq!(parsed.day(), day);
    }
}
