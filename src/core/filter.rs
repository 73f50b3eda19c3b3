//! Trip list filtering and ordering.

use std::cmp::Reverse;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::domain::{RecordId, Trip, TripStatus};

/// Criteria for the trip list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
    pub vehicle_id: Option<RecordId>,
}

impl TripFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(date) = self.date {
            match trip.resolved_date() {
                Some(when) if when.date() == date => {}
                _ => return false,
            }
        }
        if self.status.is_some_and(|status| trip.status != status) {
            return false;
        }
        if self.vehicle_id.as_ref().is_some_and(|id| &trip.vehicle_id != id) {
            return false;
        }
        true
    }
}

pub fn filter_trips(trips: &[Trip], filter: &TripFilter) -> Vec<Trip> {
    trips
        .iter()
        .filter(|trip| filter.matches(trip))
        .cloned()
        .collect()
}

/// Trips whose resolved date lies in `[start, end]`, most recent first.
/// Undated trips are left out.
pub fn trips_between(trips: &[Trip], start: NaiveDateTime, end: NaiveDateTime) -> Vec<Trip> {
    let mut selected: Vec<Trip> = trips
        .iter()
        .filter(|trip| {
            trip.resolved_date()
                .is_some_and(|when| when >= start && when <= end)
        })
        .cloned()
        .collect();
    sort_by_date_desc(&mut selected);
    selected
}

/// Most recent first; trips without a usable date sink to the end. Stable.
pub fn sort_by_date_desc(trips: &mut [Trip]) {
    trips.sort_by_key(|trip| Reverse(trip.resolved_date()));
}
