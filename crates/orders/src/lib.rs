//! Orders domain module.
//!
//! Orders capture an immutable price snapshot of every line at placement and
//! share the catalog's trash/restore/purge lifecycle.

pub mod order;

pub use order::{LineRequest, Order, OrderLine};
