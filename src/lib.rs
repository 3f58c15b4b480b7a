//! data-api: JSON CRUD backend for a single collection of records keyed by integer id.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod record;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use record::{Record, RecordId};
pub use routes::{app, common_routes, data_routes, DEFAULT_MAX_BODY_BYTES};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgRecordStore, RecordStore};
