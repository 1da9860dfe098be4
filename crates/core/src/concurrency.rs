//! Optimistic concurrency primitives shared with the persistence layer.

use crate::error::{DomainError, DomainResult};

/// Optimistic concurrency expectation for a stored record.
///
/// Every lifecycle decision is taken against a snapshot; the store must only
/// commit it if the record has not moved on in the meantime.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (seeding, migrations).
    Any,
    /// Require the record to be at an exact revision.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
