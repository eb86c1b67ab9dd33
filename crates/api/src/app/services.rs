use std::sync::Arc;

use prepaid_cards::CardEvent;
use prepaid_events::{Event, EventBus, EventEnvelope, InMemoryEventBus};
use prepaid_infra::{AppConfig, BusDispatcher, CreateCardService, InMemoryCardRepository};

pub type CardBus = InMemoryEventBus<EventEnvelope<CardEvent>>;

type CreateCard = CreateCardService<Arc<InMemoryCardRepository>, Arc<BusDispatcher<Arc<CardBus>>>>;

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Debug)]
pub struct AppServices {
    create_card: CreateCard,
    cards: Arc<InMemoryCardRepository>,
    version: String,
}

impl AppServices {
    pub fn create_card(&self) -> &CreateCard {
        &self.create_card
    }

    pub fn cards(&self) -> &InMemoryCardRepository {
        &self.cards
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let cards = Arc::new(InMemoryCardRepository::new());
    let bus: Arc<CardBus> = Arc::new(InMemoryEventBus::new());

    spawn_event_logger(&bus);

    let dispatcher = Arc::new(BusDispatcher::new(bus));

    AppServices {
        create_card: CreateCardService::new(cards.clone(), dispatcher),
        cards,
        version: config.version.clone(),
    }
}

/// Background subscriber: bus -> debug log. Exits once the bus is dropped.
fn spawn_event_logger(bus: &CardBus) {
    let sub = bus.subscribe();

    let spawned = std::thread::Builder::new()
        .name("card-events".to_string())
        .spawn(move || {
            while let Ok(env) = sub.recv() {
                let event = env.payload();
                tracing::debug!(
                    event_id = %event.event_id(),
                    event_type = event.event_type(),
                    card_id = %event.card_id(),
                    sequence = env.sequence_number(),
                    "card event published"
                );
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot start card event subscriber");
    }
}
