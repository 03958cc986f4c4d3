//! Criterion benchmarks for model registration, regeneration, and
//! physics health over the reference profile.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use porenet_bench::reference_session;
use porenet_engine::{DomainObject, ModelOptions};
use porenet_test_utils::{ConstantModel, DoubleIndexModel, ScaleModel};

fn bench_add_model(c: &mut Criterion) {
    let (mut session, profile) = reference_session(42, 4).unwrap();
    let phys = profile.physics[0];
    c.bench_function("add_model_double_2500", |b| {
        b.iter(|| {
            session
                .add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
                .unwrap();
        });
    });
}

fn bench_regenerate_all(c: &mut Criterion) {
    let (mut session, profile) = reference_session(42, 4).unwrap();
    let phys = profile.physics[1];
    session
        .phase_mut(profile.phase)
        .unwrap()
        .store_mut()
        .set("pore.temperature", vec![298.0f64; 10_000])
        .unwrap();
    session
        .add_model(phys, "pore.double", DoubleIndexModel, ModelOptions::new())
        .unwrap();
    session
        .add_model(phys, "pore.constant", ConstantModel::new(1.0), ModelOptions::new())
        .unwrap();
    let scale = ModelOptions::new()
        .with_param("source", "pore.temperature")
        .with_param("factor", 0.5);
    session
        .add_model(phys, "pore.scaled", ScaleModel, scale)
        .unwrap();
    c.bench_function("regenerate_three_models_2500", |b| {
        b.iter(|| black_box(session.regenerate(phys, "").unwrap()));
    });
}

fn bench_physics_health(c: &mut Criterion) {
    let (session, profile) = reference_session(42, 16).unwrap();
    let phys = profile.physics[0];
    c.bench_function("physics_health_16_regions_10k", |b| {
        b.iter(|| black_box(session.physics_health(phys).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_add_model,
    bench_regenerate_all,
    bench_physics_health
);
criterion_main!(benches);
