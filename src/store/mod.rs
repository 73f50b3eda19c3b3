//! Record stores: the collaborator that owns vehicles and trips.
//!
//! Stores hand out complete snapshots. A subscriber is called once with the
//! current contents and again after every successful mutation, always in
//! commit order. Listeners may read the store but must not mutate it.

mod collection;
pub mod json_backend;
pub mod memory;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::domain::{Identifiable, RecordId, Trip, TripPatch, Vehicle, VehiclePatch};
use crate::errors::FleetResult;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// A storable entity. Stores own id assignment and timestamps.
pub trait Record: Identifiable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Patch: Send + Sync;

    /// Name used in `NotFound` errors and log lines.
    const KIND: &'static str;

    fn assign_id(&mut self, id: RecordId);

    fn stamp_created(&mut self, _at: DateTime<Utc>) {}

    fn stamp_updated(&mut self, _at: DateTime<Utc>) {}

    fn apply(&mut self, patch: &Self::Patch);
}

impl Record for Vehicle {
    type Patch = VehiclePatch;
    const KIND: &'static str = "vehicle";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &VehiclePatch) {
        patch.apply_to(self);
    }
}

impl Record for Trip {
    type Patch = TripPatch;
    const KIND: &'static str = "trip";

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn apply(&mut self, patch: &TripPatch) {
        patch.apply_to(self);
    }
}

pub type SnapshotListener<T> = Box<dyn Fn(&[T]) + Send + Sync + 'static>;

/// Handle returned by [`RecordStore::subscribe`]. Dropping it detaches the
/// listener.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

pub trait RecordStore<T: Record>: Send + Sync {
    fn list(&self) -> FleetResult<Vec<T>>;

    fn subscribe(&self, listener: SnapshotListener<T>) -> FleetResult<Subscription>;

    /// Stores `record` under a fresh id and returns that id.
    fn create(&self, record: T) -> FleetResult<RecordId>;

    fn update(&self, id: &RecordId, patch: T::Patch) -> FleetResult<()>;

    fn delete(&self, id: &RecordId) -> FleetResult<()>;

    fn get(&self, id: &RecordId) -> FleetResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|record| record.id() == id))
    }
}
