//! Retention window and purge due-ness.
//!
//! Trashed records are kept for [`RETENTION_DAYS`] before an external sweep
//! may purge them. Nothing here schedules work; callers pass `now`.

use chrono::{DateTime, Duration, Utc};

use crate::state::Lifecycle;
use crate::status::LifecycleStatus;

/// Days a trashed record is kept before it is due for automatic purge.
pub const RETENTION_DAYS: i64 = 30;

pub fn retention_window() -> Duration {
    Duration::days(RETENTION_DAYS)
}

/// When a draft record becomes due for purge.
///
/// `None` for active/purged records, and for drafts whose due date falls past
/// the last representable instant (never due).
pub fn purge_due_at<R: Lifecycle>(record: &R) -> Option<DateTime<Utc>> {
    match record.status() {
        LifecycleStatus::Draft => record
            .deleted_at()
            .and_then(|at| at.checked_add_signed(retention_window())),
        _ => None,
    }
}

/// `true` iff the record is a draft trashed at least the retention window ago.
///
/// The boundary is inclusive: a record trashed exactly 30 days before `now`
/// is due.
pub fn is_purge_due<R: Lifecycle>(record: &R, now: DateTime<Utc>) -> bool {
    purge_due_at(record).is_some_and(|due| now >= due)
}

/// Whole days left before purge, rounded up; `Some(0)` once due.
///
/// Backs the "Auto-delete in N days" hint on the trash screens.
pub fn days_until_purge<R: Lifecycle>(record: &R, now: DateTime<Utc>) -> Option<i64> {
    let due = purge_due_at(record)?;
    let remaining = (due - now).num_seconds();
    if remaining <= 0 {
        return Some(0);
    }
    let day = Duration::days(1).num_seconds();
    Some((remaining + day - 1) / day)
}

/// Result of partitioning a batch by purge due-ness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgePlan<R> {
    /// Drafts past the retention window.
    pub due: Vec<R>,
    /// Everything else, untouched.
    pub retained: Vec<R>,
}

impl<R> Default for PurgePlan<R> {
    fn default() -> Self {
        Self {
            due: Vec::new(),
            retained: Vec::new(),
        }
    }
}

/// Split `records` into those due for purge at `now` and the rest.
pub fn plan_purge<R, I>(records: I, now: DateTime<Utc>) -> PurgePlan<R>
where
    R: Lifecycle,
    I: IntoIterator<Item = R>,
{
    let (due, retained) = records
        .into_iter()
        .partition(|record| is_purge_due(record, now));
    PurgePlan { due, retained }
}


#[cfg(test)]
mod tests {
    use super::test_support::Record;
    use super::*;
    use crate::state::LifecycleState;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap()
    }

    #[test]
    fn not_due_the_instant_it_is_trashed() {
        let record = Record::new("r1", LifecycleState::draft(now()));
        assert!(!is_purge_due(&record, now()));
    }

    #[test]
    fn due_exactly_at_the_retention_boundary() {
        let record = Record::new("r1", LifecycleState::draft(now() - Duration::days(30)));
        assert!(is_purge_due(&record, now()));

        let record = Record::new(
            "r2",
            LifecycleState::draft(now() - Duration::days(30) + Duration::seconds(1)),
        );
        assert!(!is_purge_due(&record, now()));
    }

    #[test]
    fn due_date_past_the_end_of_time_is_never_due() {
        let at = DateTime::<Utc>::MAX_UTC - Duration::days(10);
        let record = Record::new("far-future", LifecycleState::draft(at));
        assert_eq!(purge_due_at(&record), None);
        assert!(!is_purge_due(&record, now()));
        assert!(!is_purge_due(&record, DateTime::<Utc>::MAX_UTC));
        assert_eq!(days_until_purge(&record, now()), None);

        let plan = plan_purge(
            vec![
                record,
                Record::new("expired", LifecycleState::draft(now() - Duration::days(31))),
            ],
            now(),
        );
        assert_eq!(plan.due.len(), 1);
        assert_eq!(plan.due[0].id, "expired");
    }

    #[test]
    fn active_and_purged_are_never_due() {
        let old = now() - Duration::days(365);
        assert!(!is_purge_due(&Record::new("a", LifecycleState::active()), now()));
        assert!(!is_purge_due(&Record::new("p", LifecycleState::purged(old)), now()));
        assert_eq!(purge_due_at(&Record::new("p", LifecycleState::purged(old))), None);
    }

    #[test]
    fn days_until_purge_rounds_up() {
        let fresh = Record::new("r", LifecycleState::draft(now()));
        assert_eq!(days_until_purge(&fresh, now()), Some(30));

        let partial = Record::new("r", LifecycleState::draft(now() - Duration::hours(36)));
        assert_eq!(days_until_purge(&partial, now()), Some(29));

        let overdue = Record::new("r", LifecycleState::draft(now() - Duration::days(45)));
        assert_eq!(days_until_purge(&overdue, now()), Some(0));

        assert_eq!(days_until_purge(&Record::new("a", LifecycleState::active()), now()), None);
    }

    #[test]
    fn plan_partitions_batch() {
        let records = vec![
            Record::new("due", LifecycleState::draft(now() - Duration::days(31))),
            Record::new("fresh", LifecycleState::draft(now() - Duration::days(2))),
            Record::new("live", LifecycleState::active()),
        ];
        let plan = plan_purge(records, now());
        assert_eq!(plan.due.len(), 1);
        assert_eq!(plan.due[0].id, "due");
        assert_eq!(plan.retained.len(), 2);
    }
}
