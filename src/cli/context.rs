use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::{Config, ConfigManager};
use crate::core::money::format_amount;
use crate::core::time::{Clock, FixedClock, SystemClock};
use crate::domain::{Amount, Trip, Vehicle};
use crate::errors::FleetResult;
use crate::store::json_backend::{TRIPS_FILE, VEHICLES_FILE};
use crate::store::{JsonFileStore, RecordStore};

/// Everything a command needs: config, clock and the two collections.
pub struct CliContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub data_dir: PathBuf,
    pub vehicles: Arc<JsonFileStore<Vehicle>>,
    pub trips: Arc<JsonFileStore<Trip>>,
}

impl CliContext {
    /// Loads config from the app directory and opens the stores it points to.
    /// `now` pins the reference instant for every command.
    pub fn open(now: Option<NaiveDateTime>) -> FleetResult<Self> {
        let config = ConfigManager::new().load()?;
        let clock: Arc<dyn Clock> = match now {
            Some(instant) => Arc::new(FixedClock::new(instant)),
            None => Arc::new(SystemClock),
        };
        Self::with_config(config, clock)
    }

    pub fn with_config(config: Config, clock: Arc<dyn Clock>) -> FleetResult<Self> {
        let data_dir = config.data_dir();
        let vehicles =
            JsonFileStore::open_with_clock(data_dir.join(VEHICLES_FILE), Arc::clone(&clock))?;
        let trips = JsonFileStore::open_with_clock(data_dir.join(TRIPS_FILE), Arc::clone(&clock))?;
        tracing::debug!(data_dir = %data_dir.display(), "cli context ready");
        Ok(Self {
            config,
            clock,
            data_dir,
            vehicles: Arc::new(vehicles),
            trips: Arc::new(trips),
        })
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.local_now()
    }

    pub fn money(&self, amount: Amount) -> String {
        format_amount(&self.config.currency_symbol, amount)
    }

    pub fn all_vehicles(&self) -> FleetResult<Vec<Vehicle>> {
        self.vehicles.list()
    }

    pub fn all_trips(&self) -> FleetResult<Vec<Trip>> {
        self.trips.list()
    }
}
