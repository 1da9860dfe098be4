//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Money`
/// amounts of `75.00` are the same price wherever they came from. To "modify"
/// one, build a new one.
///
/// ```ignore
/// let a = Money::new(Decimal::new(7500, 2))?;
/// let b = Money::new(Decimal::new(75, 0))?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
