//! Runs in its own process so the zone set here does not leak into other suites.

mod common;

use common::at;
use fleet_core::core::{compute_dashboard_stats, Clock, FixedClock};
use fleet_core::domain::{resolve_date, DateValue, RecordId, StoreTimestamp, Trip, TripKind, TripStatus};

#[test]
fn instants_resolve_to_local_wall_clock() {
    std::env::set_var("TZ", "IST-5:30");

    let stamp = DateValue::Timestamp(StoreTimestamp {
        seconds: 1_741_118_400,
        nanoseconds: 0,
    });
    assert_eq!(resolve_date(Some(&stamp)), Some(at(2025, 3, 5, 1, 30)));

    let text = DateValue::Text("2025-03-04T20:00:00Z".into());
    assert_eq!(resolve_date(Some(&text)), Some(at(2025, 3, 5, 1, 30)));

    let written = DateValue::Text("2025-03-04T20:00".into());
    assert_eq!(resolve_date(Some(&written)), Some(at(2025, 3, 4, 20, 0)));

    let local = at(2025, 3, 5, 1, 30);
    assert_eq!(StoreTimestamp::from_naive(local).seconds, 1_741_118_400);

    let mut trip = Trip::new(RecordId::new(), local, TripKind::Airport, 1200)
        .with_status(TripStatus::Completed);
    trip.trip_date = Some(stamp);
    let clock = FixedClock::new(at(2025, 3, 5, 9, 0));
    let stats = compute_dashboard_stats(&[], &[trip], clock.local_now());
    assert_eq!(stats.today_trips_count, 1);
    assert_eq!(stats.today_revenue, 1200);
}
