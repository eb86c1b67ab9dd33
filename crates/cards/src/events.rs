use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prepaid_core::{AuthorizationRequestId, CardId, EventId, MerchantId};
use prepaid_events::Event;

/// Event: CardCreated (a new card was registered and persisted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCreated {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub card_id: CardId,
}

/// Event: CardLoaded (money was loaded onto a card by its holder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLoaded {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub card_id: CardId,
    pub amount: u64,
}

/// Payload shared by the authorization request events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestChange {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub card_id: CardId,
    pub merchant_id: MerchantId,
    pub request_id: AuthorizationRequestId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEvent {
    CardCreated(CardCreated),
    CardLoaded(CardLoaded),
    AuthorizationRequestCreated(AuthorizationRequestChange),
    AuthorizationRequestReversed(AuthorizationRequestChange),
    AuthorizationRequestCaptured(AuthorizationRequestChange),
}

impl CardEvent {
    /// The card this event is about.
    pub fn card_id(&self) -> CardId {
        match self {
            CardEvent::CardCreated(e) => e.card_id,
            CardEvent::CardLoaded(e) => e.card_id,
            CardEvent::AuthorizationRequestCreated(e)
            | CardEvent::AuthorizationRequestReversed(e)
            | CardEvent::AuthorizationRequestCaptured(e) => e.card_id,
        }
    }
}

impl Event for CardEvent {
    fn event_id(&self) -> EventId {
        match self {
            CardEvent::CardCreated(e) => e.event_id,
            CardEvent::CardLoaded(e) => e.event_id,
            CardEvent::AuthorizationRequestCreated(e)
            | CardEvent::AuthorizationRequestReversed(e)
            | CardEvent::AuthorizationRequestCaptured(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            CardEvent::CardCreated(_) => "card.created",
            CardEvent::CardLoaded(_) => "card.loaded",
            CardEvent::AuthorizationRequestCreated(_) => "card.authorization.created",
            CardEvent::AuthorizationRequestReversed(_) => "card.authorization.reversed",
            CardEvent::AuthorizationRequestCaptured(_) => "card.authorization.captured",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CardEvent::CardCreated(e) => e.occurred_at,
            CardEvent::CardLoaded(e) => e.occurred_at,
            CardEvent::AuthorizationRequestCreated(e)
            | CardEvent::AuthorizationRequestReversed(e)
            | CardEvent::AuthorizationRequestCaptured(e) => e.occurred_at,
        }
    }
}

impl From<CardCreated> for CardEvent {
    fn from(value: CardCreated) -> Self {
        CardEvent::CardCreated(value)
    }
}

impl From<CardLoaded> for CardEvent {
    fn from(value: CardLoaded) -> Self {
        CardEvent::CardLoaded(value)
    }
}
