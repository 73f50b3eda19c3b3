//! Live dashboard view fed by store subscriptions.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::filter::sort_by_date_desc;
use crate::core::services::{
    compute_dashboard_stats, compute_expiring_vehicles, DashboardStats, ExpiryAlert,
};
use crate::core::time::Clock;
use crate::domain::{Trip, Vehicle};
use crate::errors::FleetResult;
use crate::store::{RecordStore, Subscription};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub computed_at: NaiveDateTime,
    pub stats: DashboardStats,
    pub expiring: Vec<ExpiryAlert>,
}

struct MonitorState {
    vehicles: Vec<Vehicle>,
    trips: Vec<Trip>,
    view: DashboardView,
}

struct Recompute {
    state: Mutex<MonitorState>,
    clock: Arc<dyn Clock>,
    window_days: i64,
}

impl Recompute {
    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn vehicles_changed(&self, vehicles: &[Vehicle]) {
        let mut state = self.lock();
        state.vehicles = vehicles.to_vec();
        self.rebuild(&mut state);
    }

    fn trips_changed(&self, trips: &[Trip]) {
        let mut state = self.lock();
        state.trips = trips.to_vec();
        sort_by_date_desc(&mut state.trips);
        self.rebuild(&mut state);
    }

    fn rebuild(&self, state: &mut MonitorState) {
        let now = self.clock.local_now();
        state.view = build_view(&state.vehicles, &state.trips, now, self.window_days);
        tracing::debug!(
            vehicles = state.vehicles.len(),
            trips = state.trips.len(),
            alerts = state.view.expiring.len(),
            "dashboard view refreshed"
        );
    }
}

fn build_view(
    vehicles: &[Vehicle],
    trips: &[Trip],
    now: NaiveDateTime,
    window_days: i64,
) -> DashboardView {
    DashboardView {
        computed_at: now,
        stats: compute_dashboard_stats(vehicles, trips, now),
        expiring: compute_expiring_vehicles(vehicles, now, window_days),
    }
}

/// Keeps a [`DashboardView`] current for as long as it is alive.
///
/// Each store notification replaces the whole view. Dropping the monitor
/// detaches it from both stores.
pub struct FleetMonitor {
    inner: Arc<Recompute>,
    _subscriptions: Vec<Subscription>,
}

impl FleetMonitor {
    pub fn start(
        vehicles: Arc<dyn RecordStore<Vehicle>>,
        trips: Arc<dyn RecordStore<Trip>>,
        clock: Arc<dyn Clock>,
        window_days: i64,
    ) -> FleetResult<Self> {
        let now = clock.local_now();
        let inner = Arc::new(Recompute {
            state: Mutex::new(MonitorState {
                vehicles: Vec::new(),
                trips: Vec::new(),
                view: build_view(&[], &[], now, window_days),
            }),
            clock,
            window_days,
        });

        let on_vehicles = Arc::clone(&inner);
        let vehicle_subscription = vehicles.subscribe(Box::new(move |snapshot: &[Vehicle]| {
            on_vehicles.vehicles_changed(snapshot)
        }))?;
        let on_trips = Arc::clone(&inner);
        let trip_subscription = trips.subscribe(Box::new(move |snapshot: &[Trip]| {
            on_trips.trips_changed(snapshot)
        }))?;
        tracing::info!(window_days, "fleet monitor started");

        Ok(Self {
            inner,
            _subscriptions: vec![vehicle_subscription, trip_subscription],
        })
    }

    pub fn current(&self) -> DashboardView {
        self.inner.lock().view.clone()
    }

    /// Trips from the latest snapshot, most recent first.
    pub fn trips(&self) -> Vec<Trip> {
        self.inner.lock().trips.clone()
    }

    /// Recomputes against the clock without waiting for a store change, e.g.
    /// after midnight.
    pub fn refresh(&self) -> DashboardView {
        let mut state = self.inner.lock();
        self.inner.rebuild(&mut state);
        state.view.clone()
    }
}
