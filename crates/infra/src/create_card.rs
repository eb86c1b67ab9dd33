//! Card registration (application-level orchestration).
//!
//! ```text
//! create_card()
//!   ↓
//! 1. Construct a card (fresh id, zero balances)
//!   ↓
//! 2. Persist it through the `Saver`
//!   ↓
//! 3. Dispatch `CardCreated` through the `Dispatcher`
//!   ↓
//! 4. Return the response view
//! ```
//!
//! Steps 2 and 3 run in that order, synchronously, exactly once. They are not
//! transactional: a crash between them leaves a saved card without an event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use prepaid_cards::{Card, CardCreated, CardEvent};
use prepaid_core::{
    Clock, DomainError, DomainResult, EventId, IdGenerator, SystemClock, UuidGenerator,
};

/// Persistence capability for cards.
pub trait Saver {
    fn save_card(&self, card: &Card) -> DomainResult<()>;
}

impl<S> Saver for &S
where
    S: Saver + ?Sized,
{
    fn save_card(&self, card: &Card) -> DomainResult<()> {
        (**self).save_card(card)
    }
}

impl<S> Saver for Arc<S>
where
    S: Saver + ?Sized,
{
    fn save_card(&self, card: &Card) -> DomainResult<()> {
        (**self).save_card(card)
    }
}

/// Event dispatch capability. Fire-and-forget: no error reaches the caller.
pub trait Dispatcher {
    fn dispatch(&self, event: CardEvent);

    fn dispatch_card_created(&self, event: CardCreated) {
        self.dispatch(event.into());
    }
}

impl<D> Dispatcher for &D
where
    D: Dispatcher + ?Sized,
{
    fn dispatch(&self, event: CardEvent) {
        (**self).dispatch(event)
    }

    fn dispatch_card_created(&self, event: CardCreated) {
        (**self).dispatch_card_created(event)
    }
}

impl<D> Dispatcher for Arc<D>
where
    D: Dispatcher + ?Sized,
{
    fn dispatch(&self, event: CardEvent) {
        (**self).dispatch(event)
    }

    fn dispatch_card_created(&self, event: CardCreated) {
        (**self).dispatch_card_created(event)
    }
}

/// What a successful registration hands back. Balances are decimal text so no
/// client loses precision on values above 2^53.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardResponse {
    #[serde(rename = "uuid")]
    pub card_id: String,
    pub available_balance: String,
    pub blocked_balance: String,
}

impl From<&Card> for CreateCardResponse {
    fn from(card: &Card) -> Self {
        Self {
            card_id: card.id_typed().to_string(),
            available_balance: card.available_balance().to_string(),
            blocked_balance: card.blocked_balance().to_string(),
        }
    }
}

/// Service creating new cards.
#[derive(Debug)]
pub struct CreateCardService<S, D, G = UuidGenerator, C = SystemClock> {
    saver: S,
    dispatcher: D,
    ids: G,
    clock: C,
}

impl<S, D> CreateCardService<S, D> {
    pub fn new(saver: S, dispatcher: D) -> Self {
        Self::with_capabilities(saver, dispatcher, UuidGenerator, SystemClock)
    }
}

impl<S, D, G, C> CreateCardService<S, D, G, C> {
    pub fn with_capabilities(saver: S, dispatcher: D, ids: G, clock: C) -> Self {
        Self {
            saver,
            dispatcher,
            ids,
            clock,
        }
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}

impl<S, D, G, C> CreateCardService<S, D, G, C>
where
    S: Saver,
    D: Dispatcher,
    G: IdGenerator,
    C: Clock,
{
    /// Register a new card.
    ///
    /// Fails with `IdGeneration` before anything is saved, or with `Persistence`
    /// if the saver rejects the card. The dispatcher is only called after a
    /// successful save.
    pub fn create_card(&self) -> DomainResult<CreateCardResponse> {
        let card = Card::new(&self.ids)?;
        let event_id = EventId::generate(&self.ids)?;

        self.saver.save_card(&card).map_err(|e| {
            tracing::warn!(card_id = %card.id_typed(), error = %e, "cannot persist new card");
            into_persistence(e)
        })?;

        self.dispatcher.dispatch_card_created(CardCreated {
            event_id,
            occurred_at: self.clock.now(),
            card_id: card.id_typed(),
        });

        tracing::info!(card_id = %card.id_typed(), "card created");
        Ok(CreateCardResponse::from(&card))
    }
}

fn into_persistence(err: DomainError) -> DomainError {
    match err {
        DomainError::Persistence(_) => err,
        other => DomainError::persistence(other.to_string()),
    }
}
