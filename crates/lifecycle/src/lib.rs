//! Catalog & order lifecycle (soft delete, restore, purge).
//!
//! Records move `active -> draft -> {active, purged}`. Drafts are kept for a
//! fixed retention window before they become due for automatic purge. This
//! crate only decides transitions; persisting them is the caller's job.

pub mod manager;
pub mod purge;
pub mod state;
pub mod status;

pub use manager::LifecycleManager;
pub use purge::{
    PurgePlan, RETENTION_DAYS, days_until_purge, is_purge_due, plan_purge, purge_due_at,
    retention_window,
};
pub use state::{Lifecycle, LifecycleState};
pub use status::{LifecycleAction, LifecycleStatus};
