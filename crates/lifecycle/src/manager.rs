use chrono::{DateTime, Utc};

use sattva_core::{Clock, DomainError, DomainResult, SystemClock};

use crate::purge::{self, PurgePlan};
use crate::state::{Lifecycle, LifecycleState};
use crate::status::{LifecycleAction, LifecycleStatus};

/// Decides lifecycle transitions for catalog items and orders.
///
/// Every method is a single, pure decision over a caller-supplied snapshot:
/// it returns the proposed next record and never touches storage. A snapshot
/// that went stale between fetch and decision surfaces as
/// [`DomainError::InvalidTransition`]; callers refetch and decide again.
#[derive(Debug, Clone, Default)]
pub struct LifecycleManager<C = SystemClock> {
    clock: C,
}

impl LifecycleManager<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> LifecycleManager<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn ensure_allowed<R: Lifecycle>(
        &self,
        record: &R,
        action: LifecycleAction,
    ) -> DomainResult<LifecycleStatus> {
        let from = record.status();
        from.apply(action)
            .ok_or_else(|| DomainError::invalid_transition(action.as_str(), from.as_str()))
    }

    /// Move an active record to the trash (`draft`, `deletedAt = now`).
    pub fn request_trash<R: Lifecycle>(&self, record: &R) -> DomainResult<R> {
        self.ensure_allowed(record, LifecycleAction::Trash)?;
        Ok(record.with_lifecycle(LifecycleState::draft(self.now())))
    }

    /// Bring a trashed record back (`active`, `deletedAt` cleared).
    pub fn request_restore<R: Lifecycle>(&self, record: &R) -> DomainResult<R> {
        self.ensure_allowed(record, LifecycleAction::Restore)?;
        Ok(record.with_lifecycle(LifecycleState::active()))
    }

    /// Mark a trashed record purged.
    ///
    /// Legal for any draft, whether the admin purges it explicitly or the
    /// retention window has run out. Active records must be trashed first.
    /// The tombstone keeps the original trash timestamp.
    pub fn request_hard_delete<R: Lifecycle>(&self, record: &R) -> DomainResult<R> {
        self.ensure_allowed(record, LifecycleAction::HardDelete)?;
        let deleted_at = record
            .deleted_at()
            .ok_or_else(|| DomainError::invariant("draft record without deletedAt"))?;
        Ok(record.with_lifecycle(LifecycleState::purged(deleted_at)))
    }

    /// Dispatch an action by value.
    pub fn request<R: Lifecycle>(&self, record: &R, action: LifecycleAction) -> DomainResult<R> {
        match action {
            LifecycleAction::Trash => self.request_trash(record),
            LifecycleAction::Restore => self.request_restore(record),
            LifecycleAction::HardDelete => self.request_hard_delete(record),
        }
    }

    pub fn can<R: Lifecycle>(&self, record: &R, action: LifecycleAction) -> bool {
        record.status().apply(action).is_some()
    }

    /// Actions legal on `record` right now, in a stable order.
    pub fn allowed_actions<R: Lifecycle>(&self, record: &R) -> Vec<LifecycleAction> {
        LifecycleAction::ALL
            .into_iter()
            .filter(|action| self.can(record, *action))
            .collect()
    }

    pub fn is_purge_due<R: Lifecycle>(&self, record: &R, now: DateTime<Utc>) -> bool {
        purge::is_purge_due(record, now)
    }

    pub fn is_purge_due_now<R: Lifecycle>(&self, record: &R) -> bool {
        purge::is_purge_due(record, self.now())
    }

    pub fn days_until_purge<R: Lifecycle>(&self, record: &R) -> Option<i64> {
        purge::days_until_purge(record, self.now())
    }

    /// Purge every due record of a batch; the rest are returned unchanged.
    ///
    /// For a scheduled sweep. Records in `due` come back as purged tombstones.
    pub fn purge_due<R, I>(&self, records: I) -> DomainResult<PurgePlan<R>>
    where
        R: Lifecycle,
        I: IntoIterator<Item = R>,
    {
        let plan = purge::plan_purge(records, self.now());
        let due = plan
            .due
            .iter()
            .map(|record| self.request_hard_delete(record))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(PurgePlan {
            due,
            retained: plan.retained,
        })
    }
}
