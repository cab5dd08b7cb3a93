//! Criterion benchmarks for the harbor core.
//!
//! - `load_unload`: fill a ship from a busy quay and empty it again.
//! - `shuttle`: a loaded ship sailing back and forth between two ports.

use criterion::{Criterion, criterion_group, criterion_main};
use harbor_core::config::SimConfig;
use harbor_core::container::ContainerKind;
use harbor_core::id::*;
use harbor_core::sim::Simulation;
use harbor_core::specs::ShipSpecs;
use harbor_core::test_utils::*;
use std::hint::black_box;

/// Two ports, one roomy ship at port 0 and `n` mixed containers on its quay.
fn busy_quay(n: u32) -> (Simulation, Vec<ContainerId>) {
    let mut sim = Simulation::new(SimConfig::default());
    sim.create_port(PortId(0), KYIV.0, KYIV.1).unwrap();
    sim.create_port(PortId(1), ODESA.0, ODESA.1).unwrap();
    sim.create_ship(ShipId(0), PortId(0), ShipSpecs::new(u64::MAX, 0, 0, 0, 0, 0.5), 1e12)
        .unwrap();
    let ids = (0..n)
        .map(|i| {
            let kind = ContainerKind::ALL[(i % 4) as usize];
            stocked(&mut sim, PortId(0), 1000 + i, kind)
        })
        .collect();
    (sim, ids)
}

fn bench_load_unload(c: &mut Criterion) {
    let (sim, ids) = busy_quay(500);
    c.bench_function("load_unload_500", |b| {
        b.iter_batched(
            || sim.clone(),
            |mut sim| {
                for &id in &ids {
                    black_box(sim.load(ShipId(0), id));
                }
                for &id in &ids {
                    black_box(sim.unload(ShipId(0), id));
                }
                sim
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_shuttle(c: &mut Criterion) {
    let (mut sim, ids) = busy_quay(100);
    for &id in &ids {
        sim.load(ShipId(0), id);
    }
    c.bench_function("shuttle_100_containers", |b| {
        b.iter_batched(
            || sim.clone(),
            |mut sim| {
                black_box(sim.sail(ShipId(0), PortId(1)));
                black_box(sim.sail(ShipId(0), PortId(0)));
                sim
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_load_unload, bench_shuttle);
criterion_main!(benches);
