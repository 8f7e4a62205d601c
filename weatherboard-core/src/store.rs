//! Favorites collection mirrored to a snapshot store.

use std::collections::HashSet;

use crate::{error::StoreError, model::CityWeatherRecord, snapshot::SnapshotStore};

/// Snapshot key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "weather-favorites";

/// Ordered favorites, most recently added first, unique by `id`.
///
/// Every mutation writes the full list back before it becomes visible in
/// memory, so a failed write leaves the collection as it was.
pub struct FavoritesStore {
    records: Vec<CityWeatherRecord>,
    snapshot: Box<dyn SnapshotStore>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Open the store, loading whatever snapshot is present.
    pub fn open(snapshot: Box<dyn SnapshotStore>) -> Self {
        let records = load(snapshot.as_ref());
        Self { records, snapshot }
    }

    pub fn records(&self) -> &[CityWeatherRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&CityWeatherRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend `record`. Rejects an id that is already present.
    pub fn add(&mut self, record: CityWeatherRecord) -> Result<(), StoreError> {
        if self.contains(record.id) {
            return Err(StoreError::Duplicate(record.id));
        }

        let id = record.id;
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());

        self.commit(next)?;
        tracing::info!(id, total = self.records.len(), "added favorite");
        Ok(())
    }

    /// Remove the record with `id`. Absent ids are not an error and cause no write.
    pub fn remove(&mut self, id: u64) -> Result<Option<CityWeatherRecord>, StoreError> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let mut next = self.records.clone();
        let removed = next.remove(pos);

        self.commit(next)?;
        tracing::info!(id, total = self.records.len(), "removed favorite");
        Ok(Some(removed))
    }

    /// Replace the whole collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, records: Vec<CityWeatherRecord>) -> Result<(), StoreError> {
        self.commit(dedupe(records))
    }

    fn commit(&mut self, next: Vec<CityWeatherRecord>) -> Result<(), StoreError> {
        persist(self.snapshot.as_ref(), &next)?;
        self.records = next;
        Ok(())
    }
}

/// Read the favorites snapshot. Missing, unreadable, or malformed data yields
/// an empty list.
pub fn load(snapshot: &dyn SnapshotStore) -> Vec<CityWeatherRecord> {
    let raw = match snapshot.read(FAVORITES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "favorites snapshot unreadable; starting empty");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<CityWeatherRecord>>(&raw) {
        Ok(records) => dedupe(records),
        Err(e) => {
            tracing::warn!(error = %e, "favorites snapshot malformed; starting empty");
            Vec::new()
        }
    }
}

/// Serialize `records` and write them as the new snapshot in one call.
pub fn persist(snapshot: &dyn SnapshotStore, records: &[CityWeatherRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string(records).map_err(|e| StoreError::Persist(e.to_string()))?;
    snapshot
        .write(FAVORITES_KEY, &json)
        .map_err(|e| StoreError::Persist(format!("{e:#}")))
}

fn dedupe(records: Vec<CityWeatherRecord>) -> Vec<CityWeatherRecord> {
    let mut seen = HashSet::new();
    records.into_iter().filter(|r| seen.insert(r.id)).collect()
}
