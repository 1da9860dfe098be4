//! Lifecycle command execution: fetch, decide, compare-and-swap.
//!
//! ```text
//! id + action
//!   ↓
//! 1. Fetch the record and its revision
//!   ↓
//! 2. Ask the LifecycleManager for the next record (pure decision)
//!   ↓
//! 3. Commit with compare-and-swap on the fetched revision
//!   ↓ (revision moved on)
//! back to 1, up to `max_attempts` times
//! ```
//!
//! A decision rejected after a fresh fetch is final and returned as-is.

use thiserror::Error;

use sattva_core::{Clock, DomainError, ExpectedVersion, SystemClock};
use sattva_lifecycle::{Lifecycle, LifecycleAction, LifecycleManager};

use crate::store::{RecordStore, StoreError, Versioned};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every attempt lost a compare-and-swap race.
    #[error("record still contended after {attempts} attempts")]
    Contended { attempts: u32 },
}

impl ServiceError {
    /// Stable `code` for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Domain(e) => e.code(),
            ServiceError::Store(StoreError::NotFound(_)) => "not_found",
            ServiceError::Store(StoreError::Concurrency(_))
            | ServiceError::Store(StoreError::AlreadyExists(_))
            | ServiceError::Contended { .. } => "conflict",
            ServiceError::Store(StoreError::Unavailable(_)) => "store_unavailable",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::Domain(e) => e.http_status(),
            ServiceError::Store(StoreError::NotFound(_)) => 404,
            ServiceError::Store(StoreError::Concurrency(_))
            | ServiceError::Store(StoreError::AlreadyExists(_))
            | ServiceError::Contended { .. } => 409,
            ServiceError::Store(StoreError::Unavailable(_)) => 503,
        }
    }
}

/// Runs lifecycle actions against a [`RecordStore`].
#[derive(Debug)]
pub struct LifecycleService<S, C = SystemClock> {
    store: S,
    manager: LifecycleManager<C>,
    max_attempts: u32,
}

impl<S, C: Clock> LifecycleService<S, C> {
    pub fn new(store: S, manager: LifecycleManager<C>) -> Self {
        Self {
            store,
            manager,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn manager(&self) -> &LifecycleManager<C> {
        &self.manager
    }

    pub fn perform<R>(&self, id: &R::Id, action: LifecycleAction) -> Result<Versioned<R>, ServiceError>
    where
        R: Lifecycle,
        S: RecordStore<R>,
    {
        for attempt in 1..=self.max_attempts {
            let current = self
                .store
                .get(id)?
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            let next = self
                .manager
                .request(&current.record, action)
                .inspect_err(|err| {
                    tracing::debug!(
                        record_id = %id,
                        action = %action,
                        status = %current.record.status(),
                        error = %err,
                        "lifecycle action rejected"
                    );
                })?;
            let to = next.status();

            match self
                .store
                .compare_and_swap(id, ExpectedVersion::Exact(current.revision), next)
            {
                Ok(committed) => {
                    tracing::info!(
                        record_id = %id,
                        action = %action,
                        from = %current.record.status(),
                        to = %to,
                        revision = committed.revision,
                        "lifecycle transition committed"
                    );
                    return Ok(committed);
                }
                Err(StoreError::Concurrency(msg)) => {
                    tracing::warn!(
                        record_id = %id,
                        action = %action,
                        attempt,
                        reason = %msg,
                        "stale record, refetching"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ServiceError::Contended {
            attempts: self.max_attempts,
        })
    }

    pub fn trash<R>(&self, id: &R::Id) -> Result<Versioned<R>, ServiceError>
    where
        R: Lifecycle,
        S: RecordStore<R>,
    {
        self.perform(id, LifecycleAction::Trash)
    }

    pub fn restore<R>(&self, id: &R::Id) -> Result<Versioned<R>, ServiceError>
    where
        R: Lifecycle,
        S: RecordStore<R>,
    {
        self.perform(id, LifecycleAction::Restore)
    }

    pub fn hard_delete<R>(&self, id: &R::Id) -> Result<Versioned<R>, ServiceError>
    where
        R: Lifecycle,
        S: RecordStore<R>,
    {
        self.perform(id, LifecycleAction::HardDelete)
    }
}
