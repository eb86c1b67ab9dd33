//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Identifier of a prepaid card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

/// Identifier of a merchant (owned by an external system; only compared by value).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(Uuid);

/// Identifier of an authorization request (hold).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationRequestId(Uuid);

/// Identifier of a single entry in an authorization request's history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(Uuid);

/// Identifier of a domain event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Draw a fresh identifier from `ids`.
            pub fn generate(ids: &impl IdGenerator) -> DomainResult<Self> {
                ids.generate().map(Self)
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(CardId, "CardId");
impl_uuid_newtype!(MerchantId, "MerchantId");
impl_uuid_newtype!(AuthorizationRequestId, "AuthorizationRequestId");
impl_uuid_newtype!(SnapshotId, "SnapshotId");
impl_uuid_newtype!(EventId, "EventId");

/// Source of 128-bit universally-unique values.
///
/// Generation may fail (e.g. an exhausted entropy source behind a custom
/// implementation); callers treat that as fatal to the enclosing operation.
pub trait IdGenerator {
    fn generate(&self) -> DomainResult<Uuid>;
}

impl<G> IdGenerator for &G
where
    G: IdGenerator + ?Sized,
{
    fn generate(&self) -> DomainResult<Uuid> {
        (**self).generate()
    }
}

impl<G> IdGenerator for Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn generate(&self) -> DomainResult<Uuid> {
        (**self).generate()
    }
}

/// Default generator: UUIDv7 from the system clock and RNG.
#[derive(Debug, Default, Copy, Clone)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> DomainResult<Uuid> {
        Ok(Uuid::now_v7())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_display() {
        let id = CardId::new();
        let parsed: CardId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_failure_names_the_type() {
        let err = "not-a-uuid".parse::<CardId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("CardId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn generated_ids_are_unique_and_non_nil() {
        let a = CardId::generate(&UuidGenerator).unwrap();
        let b = CardId::generate(&UuidGenerator).unwrap();
        assert!(!a.is_nil());
        assert_ne!(a, b);
    }
}
