use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use std::sync::Arc;

use prepaid_cards::{AuthorizationRequest, Card, CardEvent};
use prepaid_core::{CardId, MerchantId, SystemClock, UuidGenerator};
use prepaid_events::{EventEnvelope, InMemoryEventBus};
use prepaid_infra::{BusDispatcher, CardLedger, CreateCardService, InMemoryCardRepository};

type Bus = Arc<InMemoryEventBus<EventEnvelope<CardEvent>>>;

fn setup_services() -> (Arc<InMemoryCardRepository>, Arc<BusDispatcher<Bus>>) {
    let bus: Bus = Arc::new(InMemoryEventBus::new());
    (
        Arc::new(InMemoryCardRepository::new()),
        Arc::new(BusDispatcher::new(bus)),
    )
}

/// Pure aggregate cost: hold and release on an in-memory card, no storage.
fn bench_hold_release_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_aggregate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hold_then_reverse", |b| {
        b.iter_batched(
            || {
                let mut card = Card::new(&UuidGenerator).unwrap();
                card.load_money(1_000).unwrap();
                card
            },
            |mut card| {
                let mut req = AuthorizationRequest::new(
                    &mut card,
                    MerchantId::new(),
                    black_box(600),
                    &UuidGenerator,
                    &SystemClock,
                )
                .unwrap();
                req.reverse(&mut card, black_box(600), &UuidGenerator, &SystemClock)
                    .unwrap();
                card
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Full service path: construct, save, publish.
fn bench_create_card(c: &mut Criterion) {
    let (repo, dispatcher) = setup_services();
    let svc = CreateCardService::new(repo, dispatcher);

    let mut group = c.benchmark_group("create_card");
    group.throughput(Throughput::Elements(1));
    group.bench_function("in_memory", |b| {
        b.iter(|| black_box(svc.create_card().unwrap()))
    });
    group.finish();
}

/// Serialized ledger path: lock, load, mutate, save, publish.
fn bench_ledger_load(c: &mut Criterion) {
    let (repo, dispatcher) = setup_services();
    let created = CreateCardService::new(repo.clone(), dispatcher.clone())
        .create_card()
        .unwrap();
    let card_id: CardId = created.card_id.parse().unwrap();
    let ledger = CardLedger::new(repo, dispatcher);

    let mut group = c.benchmark_group("card_ledger");
    group.throughput(Throughput::Elements(1));
    group.bench_function("load_money", |b| {
        b.iter(|| black_box(ledger.load_money(card_id, black_box(1)).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hold_release_cycle,
    bench_create_card,
    bench_ledger_load
);
criterion_main!(benches);
