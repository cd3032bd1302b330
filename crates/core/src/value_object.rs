//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity: two quantities of `3` are the same
/// quantity, two prices of `$19.99` are the same price. They are immutable;
/// "changing" one means producing a new value (see [`crate::Quantity::increment`]).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
