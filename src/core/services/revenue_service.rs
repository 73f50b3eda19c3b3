use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::filter::trips_between;
use crate::core::money::{self, sum};
use crate::core::period::{date_range_for, DateRange, Period};
use crate::domain::{Amount, Trip};
use crate::errors::FleetResult;

/// Revenue figures for trips dated inside an inclusive window.
///
/// `remaining_revenue` is the signed difference of the two totals, while
/// `collectible_balance` adds up per-trip balances floored at zero. The two
/// differ whenever some completed trip was over-advanced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueReport {
    pub filtered_trips: Vec<Trip>,
    pub total_trips: usize,
    pub completed_trips: usize,
    pub total_revenue: Amount,
    pub total_advance: Amount,
    pub remaining_revenue: Amount,
    pub collectible_balance: Amount,
}

pub fn compute_revenue_report(
    trips: &[Trip],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> RevenueReport {
    let filtered_trips = trips_between(trips, start, end);
    let completed_trips = filtered_trips.iter().filter(|trip| trip.is_completed()).count();
    let total_revenue = sum(&filtered_trips, Trip::is_completed, money::total);
    let total_advance = sum(&filtered_trips, Trip::is_completed, money::advance);
    let collectible_balance = sum(&filtered_trips, Trip::is_completed, money::balance);

    tracing::debug!(
        %start,
        %end,
        matched = filtered_trips.len(),
        completed_trips,
        total_revenue,
        "revenue report computed"
    );

    RevenueReport {
        total_trips: filtered_trips.len(),
        completed_trips,
        total_revenue,
        total_advance,
        remaining_revenue: total_revenue.saturating_sub(total_advance),
        collectible_balance,
        filtered_trips,
    }
}

/// A revenue report tied to the calendar period it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRevenue {
    pub period: Period,
    pub range: DateRange,
    pub report: RevenueReport,
}

pub fn compute_period_revenue(
    trips: &[Trip],
    period: Period,
    anchor: &str,
) -> FleetResult<PeriodRevenue> {
    let range = date_range_for(period, anchor)?;
    let report = compute_revenue_report(trips, range.start, range.end);
    Ok(PeriodRevenue {
        period,
        range,
        report,
    })
}
