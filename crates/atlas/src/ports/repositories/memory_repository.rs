//! Memory Repository Port
//!
//! Abstract interface for the memory collection. The collection is owned
//! by the collaborator; the derivation services only read snapshots of it.

use crate::domain::{errors::DomainError, MemoryRecord};

/// Repository interface for MemoryRecord entities
pub trait MemoryRepository: Send + Sync {
    /// Snapshot of all records, in collection order
    fn list(&self) -> Result<Vec<MemoryRecord>, DomainError>;

    /// Find a record by its identity
    fn find_by_id(&self, id: &str) -> Result<Option<MemoryRecord>, DomainError>;

    /// Append a new record, or replace the one with the same identity in place
    fn upsert(&self, record: MemoryRecord) -> Result<MemoryRecord, DomainError>;

    /// Remove a record; returns whether it existed
    fn delete(&self, id: &str) -> Result<bool, DomainError>;

    /// Remove every record; returns how many were removed
    fn clear(&self) -> Result<usize, DomainError>;
}
