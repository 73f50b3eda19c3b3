mod common;

use common::scratch_dir;
use fleet_core::config::{Config, ConfigManager};

#[test]
fn config_persists_and_points_at_data_dir() {
    let base = scratch_dir();
    let manager = ConfigManager::with_base_dir(&base);
    assert_eq!(manager.load().unwrap(), Config::default());

    let config = Config {
        currency_symbol: "Rs ".into(),
        expiry_window_days: 45,
        data_dir: Some(base.join("records")),
    };
    manager.save(&config).unwrap();

    let raw = std::fs::read_to_string(manager.path()).unwrap();
    assert!(raw.contains("\"expiry_window_days\": 45"));
    let loaded = manager.load().unwrap();
    assert_eq!(loaded.data_dir(), base.join("records"));
}

#[test]
fn invalid_window_is_not_saved() {
    let base = scratch_dir();
    let manager = ConfigManager::with_base_dir(&base);
    let config = Config {
        expiry_window_days: -3,
        ..Config::default()
    };
    assert!(manager.save(&config).is_err());
    assert!(!manager.path().exists());
}
