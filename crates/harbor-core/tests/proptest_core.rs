//! Property-based tests for the harbor core.
//!
//! Uses proptest to drive random operation sequences through a simulation
//! and check that residency, capacity and fuel invariants hold after every
//! step.

use harbor_core::config::{HeavyLimitPolicy, Rules, SimConfig};
use harbor_core::container::{CONSUMPTION_SCALE, Container, ContainerKind};
use harbor_core::id::*;
use harbor_core::port::{Port, haversine_km};
use harbor_core::sim::Simulation;
use harbor_core::specs::ShipSpecs;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_kind() -> impl Strategy<Value = ContainerKind> {
    prop_oneof![
        Just(ContainerKind::Basic),
        Just(ContainerKind::Heavy),
        Just(ContainerKind::Refrigerated),
        Just(ContainerKind::Liquid),
    ]
}

fn arb_specs() -> impl Strategy<Value = ShipSpecs> {
    (0..20_000u64, 0..6u32, 0..4u32, 0..3u32, 0..3u32, 0.0..1.0f64).prop_map(
        |(cap, all, heavy, reefer, liquid, rate)| ShipSpecs::new(cap, all, heavy, reefer, liquid, rate),
    )
}

fn arb_heavy_policy() -> impl Strategy<Value = HeavyLimitPolicy> {
    prop_oneof![Just(HeavyLimitPolicy::Cumulative), Just(HeavyLimitPolicy::Exclusive)]
}

#[derive(Debug, Clone)]
enum Op {
    Load(u64),
    Unload(u64),
    Sail(u32),
    Refuel(f64),
}

fn arb_ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            4 => (0..12u64).prop_map(Op::Load),
            2 => (0..12u64).prop_map(Op::Unload),
            2 => (0..3u32).prop_map(Op::Sail),
            1 => (-50.0..500.0f64).prop_map(Op::Refuel),
        ],
        1..=max,
    )
}

/// Three ports, twelve containers spread over them, one ship at port 0.
fn build_sim(
    specs: ShipSpecs,
    policy: HeavyLimitPolicy,
    cargo: &[(u32, ContainerKind, u32)],
) -> Simulation {
    let config = SimConfig {
        rules: Rules {
            heavy_limits: policy,
            ..Rules::default()
        },
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config);
    sim.create_port(PortId(0), 0.0, 0.0).unwrap();
    sim.create_port(PortId(1), 0.5, 0.5).unwrap();
    sim.create_port(PortId(2), -0.3, 1.0).unwrap();
    for &(weight, kind, port) in cargo {
        let id = sim.create_container(weight, Some(kind));
        sim.place_container_in_port(id, PortId(port)).unwrap();
    }
    sim.create_ship(ShipId(0), PortId(0), specs, 100.0).unwrap();
    sim
}

fn arb_cargo() -> impl Strategy<Value = Vec<(u32, ContainerKind, u32)>> {
    proptest::collection::vec((0..5000u32, arb_kind(), 0..3u32), 12)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// consumption() is exactly weight * rate * scale.
    #[test]
    fn consumption_formula(weight in any::<u32>(), kind in arb_kind()) {
        let c = Container::new(ContainerId(0), weight, kind);
        prop_assert_eq!(c.consumption(), weight as f64 * kind.rate() * CONSUMPTION_SCALE);
    }

    /// Distance is symmetric and zero for identical coordinates.
    #[test]
    fn distance_symmetric(
        lat1 in -90.0..90.0f64, lon1 in -180.0..180.0f64,
        lat2 in -90.0..90.0f64, lon2 in -180.0..180.0f64,
    ) {
        let a = Port::new(PortId(0), lat1, lon1);
        let b = Port::new(PortId(1), lat2, lon2);
        prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
        prop_assert_eq!(haversine_km(lat1, lon1, lat1, lon1), 0.0);
        prop_assert!(a.distance_to(&b) >= 0.0);
    }

    /// Random operation sequences never break residency or capacity, and
    /// refused operations leave the simulation untouched.
    #[test]
    fn invariants_hold_under_random_ops(
        specs in arb_specs(),
        policy in arb_heavy_policy(),
        cargo in arb_cargo(),
        ops in arb_ops(40),
    ) {
        let mut sim = build_sim(specs, policy, &cargo);
        let ship = ShipId(0);

        for op in ops {
            let before = sim.clone();
            let ok = match op {
                Op::Load(c) => sim.load(ship, ContainerId(c)),
                Op::Unload(c) => sim.unload(ship, ContainerId(c)),
                Op::Sail(p) => sim.sail(ship, PortId(p)),
                Op::Refuel(amount) => sim.refuel(ship, amount).is_ok(),
            };
            if !ok {
                prop_assert_eq!(&sim, &before);
            }

            prop_assert!(sim.residency_violations().is_empty());

            let s = sim.ship(ship).unwrap();
            let tally = s.tally();
            prop_assert!(tally.weight <= specs.total_weight_capacity);
            if specs.max_all_containers != 0 {
                prop_assert!(tally.total <= specs.max_all_containers);
            }
            // Under Exclusive, Refrigerated and Liquid may load past the heavy
            // limit, so only Cumulative bounds the whole heavy class.
            if specs.max_heavy_containers != 0 && policy == HeavyLimitPolicy::Cumulative {
                prop_assert!(tally.heavy_class <= specs.max_heavy_containers);
            }
            if specs.max_refrigerated_containers != 0 {
                prop_assert!(tally.refrigerated <= specs.max_refrigerated_containers);
            }
            if specs.max_liquid_containers != 0 {
                prop_assert!(tally.liquid <= specs.max_liquid_containers);
            }
            prop_assert!(s.fuel() >= 0.0);
        }
    }

    /// A voyage either burns exactly the quoted fuel or changes nothing.
    #[test]
    fn sail_burns_quoted_fuel_or_nothing(
        specs in arb_specs(),
        cargo in arb_cargo(),
        fuel in 0.0..200.0f64,
        dest in 1..3u32,
    ) {
        let mut sim = build_sim(specs, HeavyLimitPolicy::Cumulative, &cargo);
        for c in 0..12 {
            sim.load(ShipId(0), ContainerId(c));
        }
        sim.refuel(ShipId(0), fuel).unwrap();

        let ship = sim.ship(ShipId(0)).unwrap();
        let quoted = ship.fuel_required(
            sim.port(PortId(0)).unwrap(),
            sim.port(PortId(dest)).unwrap(),
        );
        let available = ship.fuel();
        let before = sim.clone();

        if sim.sail(ShipId(0), PortId(dest)) {
            prop_assert!(available + 1e-9 >= quoted);
            let left = sim.ship(ShipId(0)).unwrap().fuel();
            prop_assert!((left - (available - quoted).max(0.0)).abs() < 1e-9);
            prop_assert_eq!(sim.ship(ShipId(0)).unwrap().current_port(), Some(PortId(dest)));
        } else {
            prop_assert!(available + 1e-9 < quoted);
            prop_assert_eq!(&sim, &before);
        }
    }
}
