use std::sync::Arc;

use super::collection::Collection;
use super::{Record, RecordStore, SnapshotListener, Subscription};
use crate::core::time::{Clock, SystemClock};
use crate::domain::RecordId;
use crate::errors::FleetResult;

/// Process-local store. Contents vanish with the value.
pub struct MemoryStore<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seeds the store as-is; ids and timestamps on `records` are kept.
    pub fn with_records(records: Vec<T>) -> Self {
        Self::with_clock(records, Arc::new(SystemClock))
    }

    pub fn with_clock(records: Vec<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: Collection::new(records, clock),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn in_memory<T>(_records: &[T]) -> FleetResult<()> {
    Ok(())
}

impl<T: Record> RecordStore<T> for MemoryStore<T> {
    fn list(&self) -> FleetResult<Vec<T>> {
        Ok(self.collection.snapshot())
    }

    fn subscribe(&self, listener: SnapshotListener<T>) -> FleetResult<Subscription> {
        Ok(self.collection.subscribe(listener))
    }

    fn create(&self, record: T) -> FleetResult<RecordId> {
        self.collection.create(record, in_memory)
    }

    fn update(&self, id: &RecordId, patch: T::Patch) -> FleetResult<()> {
        self.collection.update(id, &patch, in_memory)
    }

    fn delete(&self, id: &RecordId) -> FleetResult<()> {
        self.collection.delete(id, in_memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::{Trip, TripKind, TripPatch, TripStatus, Vehicle, VehiclePatch};
    use crate::errors::FleetError;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_assigns_fresh_id_and_stamps() {
        let store: MemoryStore<Trip> =
            MemoryStore::with_clock(Vec::new(), Arc::new(FixedClock::new(noon())));
        let draft = Trip::new(RecordId::new(), noon(), TripKind::Local, 500);
        let draft_id = draft.id.clone();
        let id = store.create(draft).unwrap();
        assert_ne!(id, draft_id);

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.created_at, Some(noon().and_utc()));
        assert_eq!(stored.updated_at, stored.created_at);
    }

    #[test]
    fn subscribers_get_initial_and_follow_up_snapshots() {
        let store: MemoryStore<Vehicle> = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store
            .subscribe(Box::new(move |vehicles: &[Vehicle]| {
                sink.lock().unwrap().push(vehicles.len());
            }))
            .unwrap();

        let id = store.create(Vehicle::new("DL1C", "sedan", 4)).unwrap();
        store
            .update(
                &id,
                VehiclePatch {
                    seats: Some(5),
                    ..VehiclePatch::default()
                },
            )
            .unwrap();
        subscription.unsubscribe();
        store.delete(&id).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn listener_may_read_store_during_notification() {
        let store: Arc<MemoryStore<Vehicle>> = Arc::new(MemoryStore::new());
        let reader = Arc::clone(&store);
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&counts);
        let _subscription = store
            .subscribe(Box::new(move |_: &[Vehicle]| {
                let listed = reader.list().unwrap().len();
                sink.lock().unwrap().push(listed);
            }))
            .unwrap();
        store.create(Vehicle::new("GJ5", "van", 8)).unwrap();
        assert_eq!(*counts.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let store: MemoryStore<Trip> = MemoryStore::new();
        let missing = RecordId::from("no-such-trip");
        let err = store
            .update(&missing, TripPatch::status(TripStatus::Completed))
            .unwrap_err();
        assert!(matches!(err, FleetError::NotFound { kind: "trip", id } if id == missing));
        assert!(store.delete(&missing).is_err());
    }

    #[test]
    fn patch_recomputes_total() {
        let store: MemoryStore<Trip> = MemoryStore::new();
        let id = store
            .create(Trip::new(RecordId::new(), noon(), TripKind::Airport, 800))
            .unwrap();
        store
            .update(
                &id,
                TripPatch {
                    extra_charges: Some(150),
                    ..TripPatch::default()
                },
            )
            .unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap().total_amount, 950);
    }

    #[test]
    fn slow_listener_still_sees_snapshots_in_commit_order() {
        let store: Arc<MemoryStore<Vehicle>> = Arc::new(MemoryStore::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store
            .subscribe(Box::new(move |vehicles: &[Vehicle]| {
                if vehicles.len() == 1 {
                    thread::sleep(Duration::from_millis(300));
                }
                sink.lock().unwrap().push(vehicles.len());
            }))
            .unwrap();

        let first = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create(Vehicle::new("KA01", "sedan", 4)).unwrap())
        };
        thread::sleep(Duration::from_millis(50));
        let second = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create(Vehicle::new("KA02", "van", 8)).unwrap())
        };
        first.join().unwrap();
        second.join().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn late_subscriber_starts_from_latest_commit() {
        let store: Arc<MemoryStore<Vehicle>> = Arc::new(MemoryStore::new());
        let _slow = store
            .subscribe(Box::new(|vehicles: &[Vehicle]| {
                if !vehicles.is_empty() {
                    thread::sleep(Duration::from_millis(200));
                }
            }))
            .unwrap();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create(Vehicle::new("TN09", "suv", 6)).unwrap())
        };
        thread::sleep(Duration::from_millis(50));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _late = store
            .subscribe(Box::new(move |vehicles: &[Vehicle]| {
                sink.lock().unwrap().push(vehicles.len());
            }))
            .unwrap();
        writer.join().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&1));
        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
