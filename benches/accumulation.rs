/// Base cost accumulation benchmarks
///
/// Compares the per-minute reference loop with the closed-form slot walk
/// over incidents from a few minutes up to a full week.
use chrono::{NaiveDate, TimeDelta};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use downtime_ledger::engine::{accumulate_by_segments, accumulate_per_minute};
use downtime_ledger::rates::RateSchedule;

fn bench_accumulation(c: &mut Criterion) {
    let rates = RateSchedule::default();
    let start = NaiveDate::from_ymd_opt(2024, 6, 10)
        .and_then(|d| d.and_hms_opt(17, 30, 0))
        .expect("valid start");

    let mut group = c.benchmark_group("accumulation");

    for minutes in [20i64, 240, 1_440, 10_080] {
        let end = start + TimeDelta::minutes(minutes);
        group.throughput(Throughput::Elements(minutes as u64));

        group.bench_with_input(BenchmarkId::new("per_minute", minutes), &end, |b, end| {
            b.iter(|| accumulate_per_minute(black_box(&rates), black_box(&start), black_box(end)))
        });

        group.bench_with_input(BenchmarkId::new("segments", minutes), &end, |b, end| {
            b.iter(|| accumulate_by_segments(black_box(&rates), black_box(&start), black_box(end)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_accumulation);
criterion_main!(benches);
