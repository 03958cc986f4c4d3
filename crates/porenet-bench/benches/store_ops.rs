//! Criterion micro-benchmarks for labeled store writes and label queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use porenet_bench::{block_partition, scattered_subset};
use porenet_core::{ElementKind, LabelMode};
use porenet_store::LabeledStore;

const NUM_PORES: usize = 10_000;

/// A store with four block labels and one scattered label.
fn labeled_store() -> LabeledStore {
    let mut store = LabeledStore::new(NUM_PORES, 0);
    for (i, block) in block_partition(NUM_PORES, 4).iter().enumerate() {
        store.set_label(format!("pore.block{i}"), block).unwrap();
    }
    store
        .set_label("pore.scattered", &scattered_subset(NUM_PORES, 2_000, 7))
        .unwrap();
    store
}

fn bench_set_float_10k(c: &mut Criterion) {
    let mut store = LabeledStore::new(NUM_PORES, 0);
    let values: Vec<f64> = (0..NUM_PORES).map(|i| i as f64).collect();
    c.bench_function("store_set_float_10k", |b| {
        b.iter(|| {
            store.set("pore.diameter", black_box(values.clone())).unwrap();
        });
    });
}

fn bench_set_label_10k(c: &mut Criterion) {
    let mut store = LabeledStore::new(NUM_PORES, 0);
    let indices = scattered_subset(NUM_PORES, 5_000, 3);
    c.bench_function("store_set_label_10k", |b| {
        b.iter(|| {
            store.set_label("pore.region", black_box(&indices)).unwrap();
        });
    });
}

fn bench_select_modes(c: &mut Criterion) {
    let store = labeled_store();
    let labels = ["block0", "block1", "scattered"];
    for mode in [LabelMode::Union, LabelMode::Intersection, LabelMode::Difference] {
        c.bench_function(&format!("store_select_{mode}_10k"), |b| {
            b.iter(|| {
                black_box(store.select(ElementKind::Pore, &labels, mode).unwrap());
            });
        });
    }
}

fn bench_data_health(c: &mut Criterion) {
    let mut store = labeled_store();
    for i in 0..8 {
        store
            .set(format!("pore.prop{i}"), vec![1.0f64; NUM_PORES])
            .unwrap();
    }
    c.bench_function("store_check_data_health_10k", |b| {
        b.iter(|| black_box(store.check_data_health()));
    });
}

criterion_group!(
    benches,
    bench_set_float_10k,
    bench_set_label_10k,
    bench_select_modes,
    bench_data_health
);
criterion_main!(benches);
