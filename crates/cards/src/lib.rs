//! Prepaid card domain module.
//!
//! Balance accounting for prepaid cards and merchant holds against them,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Identifier generation and time are injected as capabilities.

pub mod authorization;
pub mod card;
pub mod events;

pub use authorization::{AuthorizationRequest, AuthorizationRequestSnapshot};
pub use card::{Card, CardRecord};
pub use events::{AuthorizationRequestChange, CardCreated, CardEvent, CardLoaded};
