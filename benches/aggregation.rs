//! Aggregation throughput over synthetic fleets.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fleet_core::core::{
    compute_dashboard_stats, compute_period_revenue, compute_utilization_report, Period,
};
use fleet_core::domain::{Trip, TripKind, TripStatus, Vehicle};

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|date| date.and_hms_opt(6, 0, 0))
        .unwrap()
}

fn synthetic_fleet(vehicles: usize, trips: usize) -> (Vec<Vehicle>, Vec<Trip>) {
    let fleet: Vec<Vehicle> = (0..vehicles)
        .map(|n| Vehicle::new(format!("KA{n:04}"), "sedan", 4))
        .collect();
    let statuses = [
        TripStatus::Scheduled,
        TripStatus::Running,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];
    let trips = (0..trips)
        .map(|n| {
            let when = origin() + Duration::hours((n % (24 * 365)) as i64);
            Trip::new(fleet[n % vehicles].id.clone(), when, TripKind::Local, 500 + (n % 40) as i64 * 25)
                .with_advance((n % 7) as i64 * 100)
                .with_status(statuses[n % statuses.len()])
        })
        .collect();
    (fleet, trips)
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");
    for size in [1_000usize, 10_000, 50_000] {
        let (vehicles, trips) = synthetic_fleet(60, size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("dashboard", size), &trips, |bencher, trips| {
            let now = origin() + Duration::days(40);
            bencher.iter(|| compute_dashboard_stats(black_box(&vehicles), black_box(trips), now))
        });

        group.bench_with_input(BenchmarkId::new("monthly_revenue", size), &trips, |bencher, trips| {
            bencher.iter(|| compute_period_revenue(black_box(trips), Period::Month, "2025-03").unwrap())
        });

        group.bench_with_input(BenchmarkId::new("utilization", size), &trips, |bencher, trips| {
            let start = origin().date();
            let end = start + Duration::days(90);
            bencher.iter(|| {
                compute_utilization_report(black_box(trips), black_box(&vehicles), start, end)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reports);
criterion_main!(benches);
