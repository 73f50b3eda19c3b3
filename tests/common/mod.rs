#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use fleet_core::domain::{Amount, RecordId, Trip, TripKind, TripStatus, Vehicle};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the test calling it.
pub fn scratch_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid fixture instant")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

pub fn trip(
    vehicle: &RecordId,
    when: NaiveDateTime,
    total: Amount,
    advance: Amount,
    status: TripStatus,
) -> Trip {
    Trip::new(vehicle.clone(), when, TripKind::Local, total)
        .with_advance(advance)
        .with_status(status)
}

/// Two named vehicles and one bare plate.
pub fn fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::new("KA01AB1234", "sedan", 4).with_name("Dzire"),
        Vehicle::new("KA05MN0042", "tempo", 12).with_name("Traveller"),
        Vehicle::new("KA03ZZ9999", "suv", 7),
    ]
}
