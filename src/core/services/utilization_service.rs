use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::filter::trips_between;
use crate::core::money::{self, sum};
use crate::core::period::DateRange;
use crate::domain::{Amount, Displayable, RecordId, Trip, Vehicle};

pub const UNKNOWN_VEHICLE_LABEL: &str = "Unknown vehicle";

/// Resolves vehicle ids to display labels.
pub struct VehicleDirectory<'a> {
    by_id: HashMap<&'a RecordId, &'a Vehicle>,
}

impl<'a> VehicleDirectory<'a> {
    pub fn new(vehicles: &'a [Vehicle]) -> Self {
        Self {
            by_id: vehicles.iter().map(|vehicle| (&vehicle.id, vehicle)).collect(),
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&'a Vehicle> {
        self.by_id.get(id).copied()
    }

    pub fn label(&self, id: &RecordId) -> String {
        self.get(id)
            .map(|vehicle| vehicle.display_label())
            .unwrap_or_else(|| UNKNOWN_VEHICLE_LABEL.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilizationRow {
    pub vehicle_id: RecordId,
    pub label: String,
    pub trips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationReport {
    pub range: DateRange,
    pub trips: Vec<Trip>,
    pub total_trips: usize,
    pub total_revenue: Amount,
    pub total_advance: Amount,
    pub remaining_revenue: Amount,
    pub vehicle_utilization: BTreeMap<RecordId, usize>,
    pub rows: Vec<UtilizationRow>,
}

/// Per-vehicle trip counts and completed revenue for `start..=end`, both
/// taken as whole days.
///
/// Every trip in range counts toward utilization whatever its status; money
/// totals only look at completed trips. A reversed interval matches nothing.
pub fn compute_utilization_report(
    trips: &[Trip],
    vehicles: &[Vehicle],
    start: NaiveDate,
    end: NaiveDate,
) -> UtilizationReport {
    let range = DateRange::spanning(start, end);
    let selected = trips_between(trips, range.start, range.end);

    let mut vehicle_utilization: BTreeMap<RecordId, usize> = BTreeMap::new();
    for trip in &selected {
        *vehicle_utilization.entry(trip.vehicle_id.clone()).or_insert(0) += 1;
    }

    let directory = VehicleDirectory::new(vehicles);
    let mut rows: Vec<UtilizationRow> = vehicle_utilization
        .iter()
        .map(|(vehicle_id, &count)| UtilizationRow {
            vehicle_id: vehicle_id.clone(),
            label: directory.label(vehicle_id),
            trips: count,
        })
        .collect();
    rows.sort_by(|a, b| b.trips.cmp(&a.trips).then_with(|| a.label.cmp(&b.label)));

    let total_revenue = sum(&selected, Trip::is_completed, money::total);
    let total_advance = sum(&selected, Trip::is_completed, money::advance);

    tracing::debug!(
        range = %range.label,
        matched = selected.len(),
        vehicles = rows.len(),
        "utilization report computed"
    );

    UtilizationReport {
        range,
        total_trips: selected.len(),
        total_revenue,
        total_advance,
        remaining_revenue: total_revenue.saturating_sub(total_advance),
        vehicle_utilization,
        rows,
        trips: selected,
    }
}
