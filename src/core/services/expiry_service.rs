use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::domain::{resolve_date, Vehicle};

pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;
/// Largest window accepted from config or the command line.
pub const MAX_EXPIRY_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpiryKind {
    Insurance,
    Permit,
}

impl fmt::Display for ExpiryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExpiryKind::Insurance => "Insurance",
            ExpiryKind::Permit => "Permit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiryAlert {
    pub vehicle: Vehicle,
    pub kind: ExpiryKind,
    pub date: NaiveDateTime,
}

impl ExpiryAlert {
    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        (self.date.date() - now.date()).num_days()
    }
}

/// Lists insurance and permit dates falling strictly between `now` and
/// `now + window_days`.
///
/// A vehicle shows up once per expiring document. Dates that have already
/// passed are not reported. A window reaching past the calendar's end has no
/// upper bound.
pub fn compute_expiring_vehicles(
    vehicles: &[Vehicle],
    now: NaiveDateTime,
    window_days: i64,
) -> Vec<ExpiryAlert> {
    let threshold = Duration::try_days(window_days).and_then(|span| now.checked_add_signed(span));
    let mut alerts = Vec::new();
    for vehicle in vehicles {
        let documents = [
            (ExpiryKind::Insurance, vehicle.insurance_expiry.as_ref()),
            (ExpiryKind::Permit, vehicle.permit_expiry.as_ref()),
        ];
        for (kind, value) in documents {
            let Some(date) = resolve_date(value) else {
                continue;
            };
            if date > now && threshold.map_or(true, |limit| date < limit) {
                alerts.push(ExpiryAlert {
                    vehicle: vehicle.clone(),
                    kind,
                    date,
                });
            }
        }
    }
    tracing::debug!(
        vehicles = vehicles.len(),
        alerts = alerts.len(),
        window_days,
        "expiry scan finished"
    );
    alerts
}
