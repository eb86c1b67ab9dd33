//! `Dispatcher` backed by an `EventBus`.

use std::sync::atomic::{AtomicU64, Ordering};

use prepaid_cards::CardEvent;
use prepaid_events::{Event, EventBus, EventEnvelope};

use crate::create_card::Dispatcher;

/// Aggregate type recorded on every card event envelope.
pub const CARD_AGGREGATE_TYPE: &str = "card";

/// Wraps card events in envelopes and publishes them on a bus.
///
/// Publish failures are logged and dropped; callers never see them.
#[derive(Debug)]
pub struct BusDispatcher<B> {
    bus: B,
    sequence: AtomicU64,
}

impl<B> BusDispatcher<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B> Dispatcher for BusDispatcher<B>
where
    B: EventBus<EventEnvelope<CardEvent>>,
{
    fn dispatch(&self, event: CardEvent) {
        let sequence_number = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let event_type = event.event_type();
        let event_id = event.event_id();
        let envelope = EventEnvelope::new(
            event_id,
            *event.card_id().as_uuid(),
            CARD_AGGREGATE_TYPE,
            sequence_number,
            event,
        );

        match self.bus.publish(envelope) {
            Ok(()) => tracing::debug!(%event_id, event_type, sequence_number, "card event published"),
            Err(e) => tracing::warn!(%event_id, event_type, error = ?e, "cannot publish card event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use prepaid_cards::{CardCreated, CardLoaded};
    use prepaid_core::{CardId, EventId};
    use prepaid_events::{InMemoryEventBus, Subscription};

    use super::*;

    /// Bus that refuses everything.
    struct ClosedBus;

    impl EventBus<EventEnvelope<CardEvent>> for ClosedBus {
        type Error = &'static str;

        fn publish(&self, _message: EventEnvelope<CardEvent>) -> Result<(), Self::Error> {
            Err("closed")
        }

        fn subscribe(&self) -> Subscription<EventEnvelope<CardEvent>> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    #[test]
    fn envelopes_carry_card_identity_and_sequence() {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let dispatcher = BusDispatcher::new(bus.clone());
        let card_id = CardId::new();

        let created = CardCreated {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            card_id,
        };
        dispatcher.dispatch_card_created(created.clone());
        dispatcher.dispatch(
            CardLoaded {
                event_id: EventId::new(),
                occurred_at: Utc::now(),
                card_id,
                amount: 10,
            }
            .into(),
        );

        let first = sub.try_recv().unwrap();
        assert_eq!(first.event_id(), created.event_id);
        assert_eq!(first.aggregate_id(), *card_id.as_uuid());
        assert_eq!(first.aggregate_type(), CARD_AGGREGATE_TYPE);
        assert_eq!(first.sequence_number(), 1);
        assert_eq!(first.payload(), &CardEvent::CardCreated(created));

        let second = sub.try_recv().unwrap();
        assert_eq!(second.sequence_number(), 2);
        assert_eq!(second.payload().event_type(), "card.loaded");
    }

    #[test]
    fn publish_failures_are_swallowed() {
        let dispatcher = BusDispatcher::new(ClosedBus);
        dispatcher.dispatch_card_created(CardCreated {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            card_id: CardId::new(),
        });
    }
}
