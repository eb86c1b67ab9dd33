//! Integration tests for the card pipeline.
//!
//! Tests: CreateCard / CardLedger → repository → BusDispatcher → EventBus → subscriber
//!
//! Verifies:
//! - Every successful operation publishes exactly one envelope, after saving
//! - Failed operations publish nothing
//! - Envelope sequence numbers follow dispatch order

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use prepaid_cards::CardEvent;
    use prepaid_core::{CardId, DomainError, MerchantId};
    use prepaid_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};

    use crate::bus_dispatcher::BusDispatcher;
    use crate::card_ledger::CardLedger;
    use crate::card_store::{CardRepository, InMemoryCardRepository};
    use crate::create_card::CreateCardService;
    use crate::testing::FailingSaver;

    type Bus = Arc<InMemoryEventBus<EventEnvelope<CardEvent>>>;

    fn setup() -> (
        Arc<InMemoryCardRepository>,
        Arc<BusDispatcher<Bus>>,
        Subscription<EventEnvelope<CardEvent>>,
    ) {
        let bus: Bus = Arc::new(InMemoryEventBus::new());
        // Subscribe BEFORE any events are published.
        let sub = bus.subscribe();
        let dispatcher = Arc::new(BusDispatcher::new(bus));
        (Arc::new(InMemoryCardRepository::new()), dispatcher, sub)
    }

    fn drain(sub: &Subscription<EventEnvelope<CardEvent>>) -> Vec<EventEnvelope<CardEvent>> {
        let mut out = Vec::new();
        while let Ok(env) = sub.recv_timeout(Duration::from_millis(20)) {
            out.push(env);
        }
        out
    }

    #[test]
    fn created_card_is_saved_then_published() {
        let (repo, dispatcher, sub) = setup();
        let svc = CreateCardService::new(repo.clone(), dispatcher);

        let res = svc.create_card().unwrap();
        let card_id: CardId = res.card_id.parse().unwrap();

        let saved = repo.get_card(card_id).unwrap();
        assert_eq!(saved.available_balance(), 0);

        let published = drain(&sub);
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].aggregate_id(), *card_id.as_uuid());
        assert_eq!(published[0].payload().event_type(), "card.created");
    }

    #[test]
    fn failed_save_publishes_nothing() {
        let (_repo, dispatcher, sub) = setup();
        let svc = CreateCardService::new(FailingSaver::new("offline"), dispatcher);

        assert!(matches!(svc.create_card(), Err(DomainError::Persistence(_))));
        assert!(drain(&sub).is_empty());
    }

    #[test]
    fn ledger_events_follow_operation_order() {
        let (repo, dispatcher, sub) = setup();
        let res = CreateCardService::new(repo.clone(), dispatcher.clone())
            .create_card()
            .unwrap();
        let card_id: CardId = res.card_id.parse().unwrap();
        let ledger = CardLedger::new(repo, dispatcher);

        ledger.load_money(card_id, 40).unwrap();
        let mut request = ledger.authorize(card_id, MerchantId::new(), 30).unwrap();
        ledger.capture(&mut request, 20).unwrap();
        ledger.reverse(&mut request, 10).unwrap();
        assert!(ledger.reverse(&mut request, 1).is_err());

        let published = drain(&sub);
        let types: Vec<_> = published.iter().map(|e| e.payload().event_type()).collect();
        assert_eq!(
            types,
            vec![
                "card.created",
                "card.loaded",
                "card.authorization.created",
                "card.authorization.captured",
                "card.authorization.reversed",
            ]
        );
        let sequence: Vec<_> = published.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(sequence, vec![1, 2, 3, 4, 5]);

        let card = ledger.repository().get_card(card_id).unwrap();
        assert_eq!((card.available_balance(), card.blocked_balance()), (20, 0));
    }
}
