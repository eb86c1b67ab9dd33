//! Aggregate root trait for in-place mutated domain models.

/// Aggregate root marker + minimal interface.
///
/// Aggregates own their invariants and are mutated through `&mut self` methods.
/// They perform no locking: exclusive access to one identity is the caller's job.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Number of successful mutations applied to this instance.
    ///
    /// Starts at 0 on construction and on reconstruction from storage.
    fn version(&self) -> u64;
}
