//! `sattva-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns)
//! shared by the pricing, lifecycle, catalog and order crates.

pub mod clock;
pub mod concurrency;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use concurrency::ExpectedVersion;
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{CatalogItemId, OrderId};
pub use money::{DiscountPercent, Money, PRICE_SCALE, round2};
pub use value_object::ValueObject;
