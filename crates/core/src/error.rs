//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failing aggregate operation returns one of these and leaves the aggregate
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Amounts must be strictly positive.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The available balance cannot cover the requested amount.
    #[error("available balance is too low (requested: {requested}, available: {available})")]
    InsufficientFunds { requested: u64, available: u64 },

    /// The blocked balance cannot cover the requested amount.
    #[error("blocked balance is too low (requested: {requested}, blocked: {blocked})")]
    InsufficientBlockedFunds { requested: u64, blocked: u64 },

    /// An authorization request cannot release or settle more than it holds.
    #[error("cannot exceed the blocked amount of the request (requested: {requested}, blocked: {blocked})")]
    ExceedsBlockedAmount { requested: u64, blocked: u64 },

    /// A balance would exceed `u64::MAX`.
    #[error("balance cannot exceed {}", u64::MAX)]
    Overflow,

    /// The card passed in is not the card the request was authorized against.
    #[error("card does not match the authorization request")]
    CardMismatch,

    /// Unique identifier generation failed.
    #[error("cannot generate identifier: {0}")]
    IdGeneration(String),

    /// The persistence collaborator rejected the write.
    #[error("cannot persist card: {0}")]
    Persistence(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn id_generation(msg: impl Into<String>) -> Self {
        Self::IdGeneration(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether the failure was caused by the caller's input (as opposed to the
    /// platform failing to do its job).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::IdGeneration(_) | Self::Persistence(_))
    }
}
