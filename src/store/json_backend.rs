use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::collection::Collection;
use super::{Record, RecordStore, SnapshotListener, Subscription};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{RecordId, Trip, Vehicle};
use crate::errors::FleetResult;

const TMP_SUFFIX: &str = "tmp";
pub const VEHICLES_FILE: &str = "vehicles.json";
pub const TRIPS_FILE: &str = "trips.json";

/// One collection persisted as a pretty-printed JSON array.
///
/// The file is read once on open and rewritten in full after each mutation.
/// A missing file is an empty collection. Entries that cannot be read as `T`
/// are left out of the collection but written back unchanged.
pub struct JsonFileStore<T: Record> {
    path: PathBuf,
    unreadable: Vec<Value>,
    collection: Collection<T>,
}

impl<T: Record> JsonFileStore<T> {
    pub fn open(path: impl Into<PathBuf>) -> FleetResult<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> FleetResult<Self> {
        let path = path.into();
        let (records, unreadable) = read_entries(&path)?;
        tracing::debug!(
            kind = T::KIND,
            path = %path.display(),
            records = records.len(),
            unreadable = unreadable.len(),
            "store opened"
        );
        Ok(Self {
            path,
            unreadable,
            collection: Collection::new(records, clock),
        })
    }

    fn persist(&self, records: &[T]) -> FleetResult<()> {
        let mut entries = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()?;
        entries.extend(self.unreadable.iter().cloned());
        write_json(&self.path, &entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JsonFileStore<Vehicle> {
    pub fn vehicles_in(dir: &Path) -> FleetResult<Self> {
        Self::open(dir.join(VEHICLES_FILE))
    }
}

impl JsonFileStore<Trip> {
    pub fn trips_in(dir: &Path) -> FleetResult<Self> {
        Self::open(dir.join(TRIPS_FILE))
    }
}

impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    fn list(&self) -> FleetResult<Vec<T>> {
        Ok(self.collection.snapshot())
    }

    fn subscribe(&self, listener: SnapshotListener<T>) -> FleetResult<Subscription> {
        Ok(self.collection.subscribe(listener))
    }

    fn create(&self, record: T) -> FleetResult<RecordId> {
        self.collection
            .create(record, |records| self.persist(records))
    }

    fn update(&self, id: &RecordId, patch: T::Patch) -> FleetResult<()> {
        self.collection
            .update(id, &patch, |records| self.persist(records))
    }

    fn delete(&self, id: &RecordId) -> FleetResult<()> {
        self.collection
            .delete(id, |records| self.persist(records))
    }
}

/// Readable records of a collection file; unreadable entries are skipped.
pub fn load_records<T: Record>(path: &Path) -> FleetResult<Vec<T>> {
    Ok(read_entries(path)?.0)
}

fn read_entries<T: Record>(path: &Path) -> FleetResult<(Vec<T>, Vec<Value>)> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok((Vec::new(), Vec::new())),
        Err(err) => return Err(err.into()),
    };
    if data.trim().is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let entries: Vec<Value> = serde_json::from_str(&data)?;
    let mut records = Vec::with_capacity(entries.len());
    let mut unreadable = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(kind = T::KIND, index, error = %err, "unreadable record skipped");
                unreadable.push(entry);
            }
        }
    }
    Ok((records, unreadable))
}

fn write_json<S: serde::Serialize + ?Sized>(path: &Path, value: &S) -> FleetResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_file(path: &Path, data: &str) -> FleetResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
