#![doc(test(attr(deny(warnings))))]

//! Fleet Core aggregates vehicle and trip records into the dashboard, revenue
//! and utilization views of a fleet-management back office.
//!
//! Records live behind the [`store::RecordStore`] collaborator; everything in
//! [`core`] is a pure transformation over snapshots of those records.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod store;
pub mod utils;

pub use errors::{FleetError, FleetResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fleet Core tracing initialized.");
    });
}
