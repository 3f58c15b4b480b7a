//! Runtime configuration types.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Which [`RecordStore`](crate::store::RecordStore) backs the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process map; optionally seeded from a JSON array file.
    Memory { seed_path: Option<PathBuf> },
    /// JSONB table in `<schema>.records`.
    Postgres { database_url: String, schema: String },
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Memory { seed_path: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub max_body_bytes: usize,
}
