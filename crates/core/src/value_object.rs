//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. An authorization request's history entries are the main
/// example in this workspace: once appended they never change.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
