//! Infrastructure layer: record storage and lifecycle orchestration.
//!
//! The domain crates decide; this crate fetches, asks, and commits with an
//! optimistic compare-and-swap so two admins racing on one record cannot both
//! win.

pub mod service;
pub mod store;
pub mod sweep;

pub use service::{LifecycleService, ServiceError};
pub use store::{InMemoryRecordStore, RecordStore, StoreError, Versioned};
pub use sweep::{SweepReport, run_purge_sweep};
