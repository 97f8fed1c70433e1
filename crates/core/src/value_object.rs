//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** domain values defined entirely by their
/// attributes; two with the same attributes are the same value. The bounds
/// keep them copyable, comparable, and debuggable — the properties that let
/// values behave like primitives.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
