use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sattva_core::{DomainError, DomainResult, Entity};

use crate::status::LifecycleStatus;

/// The persisted `{ status, deletedAt }` pair of a record.
///
/// Invariant: `deleted_at` is set iff `status != Active`. Constructors and
/// deserialization both enforce it, so an inconsistent stored record is
/// rejected instead of being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLifecycleState")]
pub struct LifecycleState {
    status: LifecycleStatus,
    deleted_at: Option<DateTime<Utc>>,
}

impl LifecycleState {
    pub fn active() -> Self {
        Self {
            status: LifecycleStatus::Active,
            deleted_at: None,
        }
    }

    pub fn draft(deleted_at: DateTime<Utc>) -> Self {
        Self {
            status: LifecycleStatus::Draft,
            deleted_at: Some(deleted_at),
        }
    }

    pub fn purged(deleted_at: DateTime<Utc>) -> Self {
        Self {
            status: LifecycleStatus::Purged,
            deleted_at: Some(deleted_at),
        }
    }

    /// Rehydrate from stored fields.
    pub fn from_parts(
        status: LifecycleStatus,
        deleted_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        match (status, deleted_at) {
            (LifecycleStatus::Active, None) => Ok(Self::active()),
            (LifecycleStatus::Active, Some(_)) => Err(DomainError::invariant(
                "active record must not carry deletedAt",
            )),
            (_, None) => Err(DomainError::invariant(format!(
                "{status} record must carry deletedAt"
            ))),
            (status, Some(at)) => Ok(Self {
                status,
                deleted_at: Some(at),
            }),
        }
    }

    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_active(&self) -> bool {
        self.status == LifecycleStatus::Active
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::active()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLifecycleState {
    status: LifecycleStatus,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawLifecycleState> for LifecycleState {
    type Error = DomainError;

    fn try_from(raw: RawLifecycleState) -> Result<Self, Self::Error> {
        LifecycleState::from_parts(raw.status, raw.deleted_at)
    }
}

/// A record with a lifecycle: catalog items, orders, draft orders.
///
/// Records are immutable snapshots here; transitions produce a new record via
/// [`Lifecycle::with_lifecycle`] and leave the input untouched.
pub trait Lifecycle: Entity + Clone {
    fn lifecycle(&self) -> &LifecycleState;

    /// Copy of the record carrying `state`.
    fn with_lifecycle(&self, state: LifecycleState) -> Self;

    fn status(&self) -> LifecycleStatus {
        self.lifecycle().status()
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.lifecycle().deleted_at()
    }
}
