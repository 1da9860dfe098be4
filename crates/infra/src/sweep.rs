//! One pass of the retention purge.
//!
//! Triggered from outside (cron, admin button); nothing here schedules itself.

use sattva_core::{Clock, ExpectedVersion};
use sattva_lifecycle::{Lifecycle, LifecycleManager};

use crate::store::{RecordStore, StoreError};

/// Outcome of a sweep pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport<Id> {
    pub scanned: usize,
    /// Records marked purged by this pass.
    pub purged: Vec<Id>,
    /// Due records that changed underneath the sweep (e.g. restored) and were left alone.
    pub skipped: Vec<Id>,
}

impl<Id> Default for SweepReport<Id> {
    fn default() -> Self {
        Self {
            scanned: 0,
            purged: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Purge every draft whose retention window has run out.
///
/// A record that changes between the snapshot and the commit is skipped; the
/// next pass re-evaluates it.
pub fn run_purge_sweep<R, S, C>(
    store: &S,
    manager: &LifecycleManager<C>,
) -> Result<SweepReport<R::Id>, StoreError>
where
    R: Lifecycle,
    S: RecordStore<R>,
    C: Clock,
{
    let now = manager.now();
    let mut report = SweepReport::default();

    for stored in store.list()? {
        report.scanned += 1;
        if !manager.is_purge_due(&stored.record, now) {
            continue;
        }

        let id = stored.record.id().clone();
        let tombstone = match manager.request_hard_delete(&stored.record) {
            Ok(tombstone) => tombstone,
            Err(err) => {
                tracing::warn!(record_id = %id, error = %err, "purge rejected");
                report.skipped.push(id);
                continue;
            }
        };

        match store.compare_and_swap(&id, ExpectedVersion::Exact(stored.revision), tombstone) {
            Ok(_) => report.purged.push(id),
            Err(StoreError::Concurrency(reason)) => {
                tracing::warn!(record_id = %id, reason = %reason, "record changed during sweep, skipping");
                report.skipped.push(id);
            }
            Err(StoreError::NotFound(_)) => {
                report.skipped.push(id);
            }
            Err(other) => return Err(other),
        }
    }

    tracing::info!(
        scanned = report.scanned,
        purged = report.purged.len(),
        skipped = report.skipped.len(),
        "purge sweep finished"
    );
    Ok(report)
}
