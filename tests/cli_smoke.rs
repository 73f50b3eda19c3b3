use std::path::Path;

use assert_cmd::Command;
use fleet_core::domain::{Trip, Vehicle};
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fleet_core_cli").unwrap();
    cmd.env("FLEET_CORE_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

fn stored<T: serde::de::DeserializeOwned>(home: &Path, file: &str) -> Vec<T> {
    let raw = std::fs::read_to_string(home.join("data").join(file)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn booking_flow_feeds_reports() {
    let home = TempDir::new().unwrap();

    cli(home.path())
        .args(["add-vehicle", "KA01", "sedan", "4", "--name", "Dzire"])
        .args(["--insurance", "2026-10-30"])
        .assert()
        .success()
        .stdout(contains("Added Dzire (KA01)"));
    let vehicles: Vec<Vehicle> = stored(home.path(), "vehicles.json");
    let vehicle_id = vehicles[0].id.to_string();

    cli(home.path())
        .args(["add-trip", &vehicle_id, "2026-10-16T09:00", "1200"])
        .args(["--extra", "300", "--advance", "500", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("₹1500"));

    cli(home.path())
        .args(["--now", "2026-10-16T12:00", "dashboard"])
        .assert()
        .success()
        .stdout(contains("₹1500"))
        .stdout(contains("Expiring soon"))
        .stdout(contains("Dzire (KA01) Insurance expires 30 Oct 2026 (14 days)"));

    cli(home.path())
        .args(["revenue", "week", "2026-W42"])
        .assert()
        .success()
        .stdout(contains("Oct 12 - Oct 18, 2026"))
        .stdout(contains("₹1000"));

    cli(home.path())
        .args(["report", "2026-10-01", "2026-10-31"])
        .assert()
        .success()
        .stdout(contains("Dzire (KA01)"));

    let trips: Vec<Trip> = stored(home.path(), "trips.json");
    let trip_id = trips[0].id.to_string();
    cli(home.path())
        .args(["set-trip-status", &trip_id, "cancelled"])
        .assert()
        .success();
    cli(home.path())
        .args(["trips", "--status", "cancelled"])
        .assert()
        .success()
        .stdout(contains("Trips (1)"));
}

#[test]
fn unknown_command_prints_usage_and_fails() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("launch")
        .assert()
        .failure()
        .stdout(contains("Usage: fleet_core_cli"))
        .stderr(contains("unknown command `launch`"));
}

#[test]
fn missing_trip_is_reported() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["delete-trip", "0b6f2f0e-4d8a-4f3e-9a57-3c1b6f7e2d10"])
        .assert()
        .failure()
        .stderr(contains("trip not found"));
}

#[test]
fn version_reports_package() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(contains("fleet_core 0.1.0"));
}

#[test]
fn absurd_expiry_window_is_rejected() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["expiring", "--days", "1000000000000"])
        .assert()
        .failure()
        .stderr(contains("--days must be a number from 1 to 36500"));
    cli(home.path())
        .args(["expiring", "--days", "36500"])
        .assert()
        .success();
}

#[test]
fn reversed_report_interval_is_rejected() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["report", "2026-10-31", "2026-10-01"])
        .assert()
        .failure()
        .stderr(contains("is before start"));
}

#[test]
fn store_generated_ids_are_accepted() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["add-trip", "Xk2pQ9fireStoreId", "2026-10-16T09:00", "800"])
        .assert()
        .success()
        .stdout(contains("No vehicle with id Xk2pQ9fireStoreId"));
    cli(home.path())
        .args(["trips", "--vehicle", "Xk2pQ9fireStoreId"])
        .assert()
        .success()
        .stdout(contains("Trips (1)"));
    cli(home.path())
        .args(["delete-trip", "Xk2pQ9fireStoreId"])
        .assert()
        .failure()
        .stderr(contains("trip not found: Xk2pQ9fireStoreId"));
}
