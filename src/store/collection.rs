use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use super::{Record, SnapshotListener, Subscription};
use crate::core::time::Clock;
use crate::domain::RecordId;
use crate::errors::{FleetError, FleetResult};

type SharedListener<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

struct Listeners<T> {
    next_id: u64,
    entries: BTreeMap<u64, SharedListener<T>>,
}

/// Records plus subscribers, shared by every store implementation.
///
/// Mutations run against a working copy; the copy only replaces the live
/// records once `persist` succeeds. `delivery` is held from the moment a
/// snapshot is taken until every listener has seen it, so snapshots reach
/// listeners in commit order and a new subscriber cannot miss a commit.
/// The records lock is released before listeners run, so they may read the
/// store again.
pub(crate) struct Collection<T: Record> {
    delivery: Mutex<()>,
    records: Mutex<Vec<T>>,
    listeners: Arc<Mutex<Listeners<T>>>,
    clock: Arc<dyn Clock>,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Record> Collection<T> {
    pub(crate) fn new(records: Vec<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            delivery: Mutex::new(()),
            records: Mutex::new(records),
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
            clock,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        lock(&self.records).clone()
    }

    pub(crate) fn subscribe(&self, listener: SnapshotListener<T>) -> Subscription {
        let listener: SharedListener<T> = Arc::from(listener);
        let _delivery = lock(&self.delivery);
        let current = self.snapshot();
        let id = {
            let mut listeners = lock(&self.listeners);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, Arc::clone(&listener));
            id
        };
        listener(&current);

        let registry: Weak<Mutex<Listeners<T>>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).entries.remove(&id);
            }
        })
    }

    pub(crate) fn create(
        &self,
        mut record: T,
        persist: impl FnOnce(&[T]) -> FleetResult<()>,
    ) -> FleetResult<RecordId> {
        let id = RecordId::new();
        record.assign_id(id.clone());
        record.stamp_created(self.clock.now());
        self.mutate(persist, move |records| {
            records.push(record);
            Ok(())
        })?;
        tracing::info!(kind = T::KIND, %id, "record created");
        Ok(id)
    }

    pub(crate) fn update(
        &self,
        id: &RecordId,
        patch: &T::Patch,
        persist: impl FnOnce(&[T]) -> FleetResult<()>,
    ) -> FleetResult<()> {
        let now = self.clock.now();
        self.mutate(persist, |records| {
            let record = records
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            record.apply(patch);
            record.stamp_updated(now);
            Ok(())
        })?;
        tracing::info!(kind = T::KIND, %id, "record updated");
        Ok(())
    }

    pub(crate) fn delete(
        &self,
        id: &RecordId,
        persist: impl FnOnce(&[T]) -> FleetResult<()>,
    ) -> FleetResult<()> {
        self.mutate(persist, |records| {
            let position = records
                .iter()
                .position(|record| record.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            records.remove(position);
            Ok(())
        })?;
        tracing::info!(kind = T::KIND, %id, "record deleted");
        Ok(())
    }

    fn mutate(
        &self,
        persist: impl FnOnce(&[T]) -> FleetResult<()>,
        op: impl FnOnce(&mut Vec<T>) -> FleetResult<()>,
    ) -> FleetResult<()> {
        let _delivery = lock(&self.delivery);
        let snapshot = {
            let mut records = lock(&self.records);
            let mut working = records.clone();
            op(&mut working)?;
            persist(&working)?;
            *records = working;
            records.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    fn notify(&self, snapshot: &[T]) {
        let listeners: Vec<SharedListener<T>> =
            lock(&self.listeners).entries.values().cloned().collect();
        tracing::debug!(kind = T::KIND, listeners = listeners.len(), "notifying subscribers");
        for listener in listeners {
            listener(snapshot);
        }
    }
}

fn not_found<T: Record>(id: &RecordId) -> FleetError {
    FleetError::NotFound {
        kind: T::KIND,
        id: id.clone(),
    }
}
