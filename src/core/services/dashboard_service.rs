use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::money::{self, sum};
use crate::domain::{Amount, Trip, Vehicle};

/// Headline numbers for the dashboard, scoped to the reference day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub active_vehicles: usize,
    pub today_trips_count: usize,
    pub today_revenue: Amount,
    pub today_trips: Vec<Trip>,
}

/// Counts the fleet and collects the trips that fall on `now`'s calendar date.
///
/// Only completed trips contribute revenue. Trips without a usable date are
/// not part of "today" at all.
pub fn compute_dashboard_stats(
    vehicles: &[Vehicle],
    trips: &[Trip],
    now: NaiveDateTime,
) -> DashboardStats {
    let today = now.date();
    let today_trips: Vec<Trip> = trips
        .iter()
        .filter(|trip| trip.resolved_date().is_some_and(|when| when.date() == today))
        .cloned()
        .collect();
    let today_revenue = sum(&today_trips, Trip::is_completed, money::total);
    let active_vehicles = vehicles.iter().filter(|vehicle| vehicle.is_active()).count();

    tracing::debug!(
        %today,
        trips_loaded = trips.len(),
        today_trips = today_trips.len(),
        today_revenue,
        "dashboard stats computed"
    );

    DashboardStats {
        total_vehicles: vehicles.len(),
        active_vehicles,
        today_trips_count: today_trips.len(),
        today_revenue,
        today_trips,
    }
}
