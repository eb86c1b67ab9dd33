//! Serialized card operations: load money, authorize, reverse, capture.
//!
//! Every operation runs the same pipeline inside the lock for its card:
//!
//! ```text
//! lock(card_id) → get_card → domain call → save_card → dispatch
//! ```
//!
//! A failing step aborts the pipeline before anything is saved or dispatched.
//! Authorization requests are owned by the caller; `reverse`/`capture` only
//! commit the caller's request once the card has been saved.

use prepaid_cards::{AuthorizationRequest, AuthorizationRequestChange, Card, CardEvent, CardLoaded};
use prepaid_core::{
    CardId, Clock, DomainResult, EventId, IdGenerator, MerchantId, SystemClock, UuidGenerator,
};

use crate::card_locks::CardLocks;
use crate::card_store::CardRepository;
use crate::create_card::Dispatcher;

#[derive(Debug)]
pub struct CardLedger<R, D, G = UuidGenerator, C = SystemClock> {
    repository: R,
    dispatcher: D,
    locks: CardLocks,
    ids: G,
    clock: C,
}

impl<R, D> CardLedger<R, D> {
    pub fn new(repository: R, dispatcher: D) -> Self {
        Self::with_capabilities(repository, dispatcher, UuidGenerator, SystemClock)
    }
}

impl<R, D, G, C> CardLedger<R, D, G, C> {
    pub fn with_capabilities(repository: R, dispatcher: D, ids: G, clock: C) -> Self {
        Self {
            repository,
            dispatcher,
            locks: CardLocks::new(),
            ids,
            clock,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R, D, G, C> CardLedger<R, D, G, C>
where
    R: CardRepository,
    D: Dispatcher,
    G: IdGenerator,
    C: Clock,
{
    /// Load `amount` onto the card. Returns the card as saved.
    pub fn load_money(&self, card_id: CardId, amount: u64) -> DomainResult<Card> {
        self.locks.with_card(card_id, || {
            let mut card = self.repository.get_card(card_id)?;
            let event_id = EventId::generate(&self.ids)?;

            card.load_money(amount)?;
            self.repository.save_card(&card)?;

            self.dispatcher.dispatch(
                CardLoaded {
                    event_id,
                    occurred_at: self.clock.now(),
                    card_id,
                    amount,
                }
                .into(),
            );
            tracing::info!(%card_id, amount, "card loaded");
            Ok(card)
        })
    }

    /// Place a hold of `amount` on the card for `merchant_id`.
    pub fn authorize(
        &self,
        card_id: CardId,
        merchant_id: MerchantId,
        amount: u64,
    ) -> DomainResult<AuthorizationRequest> {
        self.locks.with_card(card_id, || {
            let mut card = self.repository.get_card(card_id)?;
            let event_id = EventId::generate(&self.ids)?;

            let request =
                AuthorizationRequest::new(&mut card, merchant_id, amount, &self.ids, &self.clock)?;
            self.repository.save_card(&card)?;

            self.dispatcher
                .dispatch(CardEvent::AuthorizationRequestCreated(self.change(
                    event_id, &request, amount,
                )));
            tracing::info!(
                %card_id,
                request_id = %request.id_typed(),
                %merchant_id,
                amount,
                "authorization request created"
            );
            Ok(request)
        })
    }

    /// Release `amount` of `request`'s hold. Returns the card as saved.
    pub fn reverse(&self, request: &mut AuthorizationRequest, amount: u64) -> DomainResult<Card> {
        let card_id = request.card_id();
        self.locks.with_card(card_id, || {
            let mut card = self.repository.get_card(card_id)?;
            let event_id = EventId::generate(&self.ids)?;

            let mut next = request.clone();
            next.reverse(&mut card, amount, &self.ids, &self.clock)?;
            self.repository.save_card(&card)?;
            *request = next;

            self.dispatcher
                .dispatch(CardEvent::AuthorizationRequestReversed(self.change(
                    event_id, request, amount,
                )));
            tracing::info!(%card_id, request_id = %request.id_typed(), amount, "authorization request reversed");
            Ok(card)
        })
    }

    /// Settle `amount` of `request`'s hold. Returns the card as saved.
    pub fn capture(&self, request: &mut AuthorizationRequest, amount: u64) -> DomainResult<Card> {
        let card_id = request.card_id();
        self.locks.with_card(card_id, || {
            let mut card = self.repository.get_card(card_id)?;
            let event_id = EventId::generate(&self.ids)?;

            let mut next = request.clone();
            next.capture(&mut card, amount, &self.ids, &self.clock)?;
            self.repository.save_card(&card)?;
            *request = next;

            self.dispatcher
                .dispatch(CardEvent::AuthorizationRequestCaptured(self.change(
                    event_id, request, amount,
                )));
            tracing::info!(%card_id, request_id = %request.id_typed(), amount, "authorization request captured");
            Ok(card)
        })
    }

    fn change(
        &self,
        event_id: EventId,
        request: &AuthorizationRequest,
        amount: u64,
    ) -> AuthorizationRequestChange {
        AuthorizationRequestChange {
            event_id,
            occurred_at: self.clock.now(),
            card_id: request.card_id(),
            merchant_id: request.merchant_id(),
            request_id: request.id_typed(),
            amount,
        }
    }
}
