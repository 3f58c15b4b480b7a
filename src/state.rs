//! Shared application state for all routes. The store is the only shared mutable resource.

use crate::config::StoreBackend;
use crate::error::AppError;
use crate::store::{MemoryStore, PgRecordStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: impl RecordStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open the configured backend. Postgres creates its database and table when missing.
    pub async fn from_backend(backend: &StoreBackend) -> Result<Self, AppError> {
        match backend {
            StoreBackend::Memory { seed_path: None } => Ok(Self::new(MemoryStore::new())),
            StoreBackend::Memory {
                seed_path: Some(path),
            } => Ok(Self::new(MemoryStore::load_seed(path).await?)),
            StoreBackend::Postgres { database_url, schema } => {
                let store = PgRecordStore::connect(database_url, schema).await?;
                store.ensure_tables().await?;
                Ok(Self::new(store))
            }
        }
    }
}
