//! Benchmark: publish fan-out cost
//!
//! Every publish copies the handler list for the event kind before
//! dispatch. This measures that cost against the number of subscribers,
//! with handlers that do next to nothing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricewatch_core::event_bus::{EventBus, EventKind, Handler, PriceUpdateEvent};
use pricewatch_core::{PriceSnapshot, Ticker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_fanout");
    let snapshot = PriceSnapshot::new(Ticker::stock("AAPL"), 190.0, 1.25, 0.66);

    for subscribers in [0usize, 1, 8, 64] {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU64::new(0));
        for i in 0..subscribers {
            let counter = counter.clone();
            bus.subscribe(
                EventKind::PriceUpdate,
                Handler::from_fn(format!("h{i}"), move |_| {
                    counter.fetch_add(1, Ordering::Relaxed);
                }),
            );
        }

        group.throughput(Throughput::Elements(subscribers.max(1) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| black_box(bus.publish(PriceUpdateEvent::new(snapshot.clone()))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_publish_fanout);
criterion_main!(benches);
