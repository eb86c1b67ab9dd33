//! Infrastructure layer: card services, storage, event dispatch, config.

pub mod bus_dispatcher;
pub mod card_ledger;
pub mod card_locks;
pub mod card_store;
pub mod config;
pub mod create_card;
#[cfg(test)]
mod testing;

mod integration_tests;

pub use bus_dispatcher::BusDispatcher;
pub use card_ledger::CardLedger;
pub use card_locks::CardLocks;
pub use card_store::{CardRepository, InMemoryCardRepository};
pub use config::{AppConfig, ConfigError};
pub use create_card::{CreateCardResponse, CreateCardService, Dispatcher, Saver};
