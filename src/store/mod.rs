//! Record store abstraction. The router only sees this trait; backends live in submodules.

pub mod memory;
pub mod postgres;

use crate::error::StoreError;
use crate::record::{Record, RecordId};
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgRecordStore};

/// Persistence collaborator for the collection. Each call is atomic for a single record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, in the backend's natural order.
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a record keyed by its own `id`. Fails with `MissingId` or `Duplicate` without mutating.
    async fn create(&self, record: Record) -> Result<Record, StoreError>;

    /// Replace the record stored at `id`. `false` when no such record exists.
    ///
    /// A record whose own integer `id` differs from `id` moves to that key, so the stored key
    /// always matches the visible id. Fails with `Duplicate` if that key is already taken.
    async fn replace(&self, id: RecordId, record: Record) -> Result<bool, StoreError>;

    /// Remove the record stored at `id`. `false` when nothing was removed.
    async fn remove(&self, id: RecordId) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
