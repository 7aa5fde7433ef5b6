//! # Peer Liveness Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Routing table | insert into a table of 256 × k peers |
//! | Routing table | find closest 20 among 5000 peers |
//! | Pending registry | mark then clear under contention-free load |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_01_peer_liveness::{
    ConnectionDirection, NodeId, PendingConnections, RoutingTable, Timestamp,
};
use rand::Rng;

fn random_ids(count: usize) -> Vec<NodeId> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| NodeId::new(rng.gen())).collect()
}

fn bench_routing_table_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing-table-insert");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 5_000] {
        let ids = random_ids(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ids, |b, ids| {
            b.iter(|| {
                let mut table = RoutingTable::new(NodeId::zero(), 20);
                for id in ids {
                    let _ = table.insert(*id, Timestamp::new(1));
                }
                black_box(table.size())
            })
        });
    }
    group.finish();
}

fn bench_find_closest(c: &mut Criterion) {
    let mut table = RoutingTable::new(NodeId::zero(), 20);
    for id in random_ids(5_000) {
        let _ = table.insert(id, Timestamp::new(1));
    }
    let target = NodeId::new([0x55; 32]);

    c.bench_function("routing-table-find-closest-20", |b| {
        b.iter(|| black_box(table.find_closest(black_box(&target), 20)))
    });
}

fn bench_pending_mark_clear(c: &mut Criterion) {
    let registry = Arc::new(PendingConnections::new(1024));
    let ids = random_ids(512);

    c.bench_function("pending-guard-cycle-512", |b| {
        b.iter(|| {
            for id in &ids {
                let guard = registry.try_begin(*id, ConnectionDirection::Outbound, Timestamp::new(1));
                black_box(guard.is_ok());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_routing_table_insert,
    bench_find_closest,
    bench_pending_mark_clear
);
criterion_main!(benches);
