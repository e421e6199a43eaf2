//! Benchmarks for write fan-out and derived-chain reads.

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ripple_core::{computed, ref_cell, watch_effect, Computed};

fn write_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_fan_out");

    for subscribers in [1_usize, 8, 64] {
        let source = ref_cell(0_u64);
        let sink = Arc::new(AtomicU64::new(0));

        for _ in 0..subscribers {
            let source = source.clone();
            let sink = sink.clone();
            watch_effect(move || {
                sink.fetch_add(source.get(), Ordering::Relaxed);
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                let mut next = 0;
                b.iter(|| {
                    next += 1;
                    source.set(black_box(next));
                });
            },
        );
    }

    group.finish();
}

fn derived_chain_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_chain_read");

    for depth in [1_usize, 4, 16] {
        let source = ref_cell(1_u64);
        let first = source.clone();
        let mut head: Computed<u64> = computed(move || first.get());
        for _ in 1..depth {
            let prev = head.clone();
            head = computed(move || prev.get() + 1);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(head.get()));
        });
    }

    group.finish();
}

criterion_group!(benches, write_fan_out, derived_chain_read);
criterion_main!(benches);
