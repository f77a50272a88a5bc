use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use futures::stream;
use pjstat::{
    aggregation::Aggregator,
    timezone::TimezoneConfig,
    types::{ClockFormat, DailyDate, ISOTimestamp, PracticeSession},
};
use std::hint::black_box;

fn create_test_sessions(count: usize) -> Vec<PracticeSession> {
    let base_time = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();

    (0..count)
        .map(|i| PracticeSession {
            // Spread sessions over roughly a year of varying times of day
            start_time: ISOTimestamp::new(base_time - chrono::Duration::hours((i * 7 % 8760) as i64)),
            minutes: (i % 90) as u64,
            instrument: if i % 2 == 0 {
                Some("Piano".to_string())
            } else {
                Some("Violin".to_string())
            },
        })
        .collect()
}

fn benchmark_practice_report(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("practice_report");
    group.sample_size(10);

    let aggregator = Aggregator::new(
        TimezoneConfig::from_flags(None, true).unwrap(),
        ClockFormat::default(),
    );
    let today = DailyDate::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    for count in [100usize, 1_000, 10_000] {
        group.bench_function(format!("aggregate_{count}_sessions"), |b| {
            let sessions = create_test_sessions(count);

            b.iter(|| {
                let sessions_stream = stream::iter(sessions.clone().into_iter().map(Ok));
                runtime.block_on(async {
                    let report = aggregator
                        .practice_report(sessions_stream, today)
                        .await
                        .unwrap();
                    black_box(report);
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_practice_report);
criterion_main!(benches);
