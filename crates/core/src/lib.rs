//! `prepaid-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the capabilities the domain needs from the outside
//! world (id generation, time), and the shared error taxonomy.

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use clock::{Clock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::{
    AuthorizationRequestId, CardId, EventId, IdGenerator, MerchantId, SnapshotId, UuidGenerator,
};
pub use value_object::ValueObject;
