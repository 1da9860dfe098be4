//! Catalog domain module.
//!
//! Rudraksha, bracelets and gemstones share one item model, one lifecycle and
//! one pricing path, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod item;
pub mod selection;

pub use item::{CatalogItem, CatalogKind};
pub use selection::{CheckoutQuote, Selection};
