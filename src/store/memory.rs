//! In-memory store: ordered map keyed by id, shared behind `Arc<RwLock<_>>`.

use crate::error::{ConfigError, StoreError};
use crate::record::{Record, RecordId};
use crate::store::RecordStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<RecordId, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records`. Records without an integer id are rejected.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let mut map = BTreeMap::new();
        for rec in records {
            let id = rec.id().ok_or(StoreError::MissingId)?;
            if map.insert(id, rec).is_some() {
                return Err(StoreError::Duplicate(id));
            }
        }
        Ok(Self {
            records: Arc::new(RwLock::new(map)),
        })
    }

    /// Load a JSON array of records from `path` into a new store.
    pub async fn load_seed(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
        let records: Vec<Record> = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
        let count = records.len();
        let store = Self::with_records(records)
            .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), count, "seeded memory store");
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<RecordId, Record>>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<RecordId, Record>>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create(&self, record: Record) -> Result<Record, StoreError> {
        let id = record.id().ok_or(StoreError::MissingId)?;
        let mut guard = self.write()?;
        if guard.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        guard.insert(id, record.clone());
        Ok(record)
    }

    async fn replace(&self, id: RecordId, record: Record) -> Result<bool, StoreError> {
        let mut guard = self.write()?;
        if !guard.contains_key(&id) {
            return Ok(false);
        }
        let target = record.id().unwrap_or(id);
        if target != id {
            if guard.contains_key(&target) {
                return Err(StoreError::Duplicate(target));
            }
            guard.remove(&id);
        }
        guard.insert(target, record);
        Ok(true)
    }

    async fn remove(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
