//! Pricing engine.
//!
//! Derives the chargeable price of a catalog product from its base price, an
//! optional variant selection, an optional energization add-on and a discount.
//! The same functions run in the checkout UI and when the order is placed, so
//! displayed and charged totals cannot drift apart.

pub mod energization;
pub mod engine;
pub mod variant;

pub use energization::{
    EnergizationAddon, EnergizationForm, EnergizationSelection, Gender, Purpose,
    validate_energization_selection,
};
pub use engine::{PriceQuote, compute_final_price, quote};
pub use variant::VariantOption;
