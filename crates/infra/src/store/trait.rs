use thiserror::Error;

use sattva_core::{Entity, ExpectedVersion};

/// A stored record together with its revision.
///
/// The revision starts at 1 on insert and increases by one on every committed
/// write. It is the compare-and-swap token for optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<R> {
    pub record: R,
    pub revision: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The record moved on since it was read.
    #[error("concurrency conflict: {0}")]
    Concurrency(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    AlreadyExists(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence port for lifecycle-managed records.
///
/// Records are stored verbatim; the store adds nothing but the revision.
pub trait RecordStore<R: Entity>: Send + Sync {
    /// Insert a new record at revision 1.
    fn insert(&self, record: R) -> Result<Versioned<R>, StoreError>;

    fn get(&self, id: &R::Id) -> Result<Option<Versioned<R>>, StoreError>;

    /// Snapshot of every record, ordered by id.
    fn list(&self) -> Result<Vec<Versioned<R>>, StoreError>;

    /// Replace the record if its revision still matches `expected`.
    fn compare_and_swap(
        &self,
        id: &R::Id,
        expected: ExpectedVersion,
        next: R,
    ) -> Result<Versioned<R>, StoreError>;
}
