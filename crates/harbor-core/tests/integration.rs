//! End-to-end runs through the public registry API.

use harbor_core::config::SimConfig;
use harbor_core::container::{CONSUMPTION_SCALE, Container, ContainerKind};
use harbor_core::id::*;
use harbor_core::sim::{Location, Simulation};
use harbor_core::test_utils::*;

// ===========================================================================
// Container consumption
// ===========================================================================

#[test]
fn one_tonne_consumption_per_kind() {
    let expected = [
        (ContainerKind::Basic, 2.5),
        (ContainerKind::Heavy, 3.0),
        (ContainerKind::Refrigerated, 5.0),
        (ContainerKind::Liquid, 4.0),
    ];
    for (i, (kind, value)) in expected.into_iter().enumerate() {
        let c = Container::new(ContainerId(i as u64), 1000, kind);
        assert_eq!(c.consumption(), 1000.0 * kind.rate() * CONSUMPTION_SCALE);
        assert!((c.consumption() - value).abs() < 1e-12);
    }
}

// ===========================================================================
// Two-port round trip
// ===========================================================================

#[test]
fn load_sail_unload_between_two_ports() {
    let mut sim = two_port_sim(SimConfig::default());
    let c = sim.create_container(1000, None);
    sim.place_container_in_port(c, PortId(0)).unwrap();

    assert!(sim.load(ShipId(0), c));
    assert!(sim.sail(ShipId(0), PortId(1)));
    // Still aboard after the voyage.
    assert_eq!(sim.location(c), Some(Location::Ship(ShipId(0))));
    assert!(sim.unload(ShipId(0), c));

    assert!(sim.port(PortId(1)).unwrap().has_container(c));
    assert!(!sim.port(PortId(0)).unwrap().has_container(c));
    assert_eq!(sim.location(c), Some(Location::Port(PortId(1))));
    assert!(sim.residency_violations().is_empty());
}

#[test]
fn voyage_fuel_matches_formula() {
    let mut sim = two_port_sim(SimConfig::default());
    let c = stocked(&mut sim, PortId(0), 1000, ContainerKind::Basic);
    assert!(sim.load(ShipId(0), c));

    let distance = sim
        .port(PortId(0))
        .unwrap()
        .distance_to(sim.port(PortId(1)).unwrap());
    let voyage = sim.try_sail(ShipId(0), PortId(1)).unwrap();
    assert_eq!(voyage.distance_km, distance);
    assert_eq!(voyage.fuel_used, distance * (0.1 + 2.5));
    assert_eq!(sim.ship(ShipId(0)).unwrap().fuel(), 1000.0 - voyage.fuel_used);
}

#[test]
fn missing_container_is_a_plain_refusal() {
    let mut sim = two_port_sim(SimConfig::default());
    let c = stocked(&mut sim, PortId(0), 1000, ContainerKind::Basic);
    let before = sim.clone();
    assert!(!sim.load(ShipId(0), ContainerId(999)));
    assert_eq!(sim, before);
    assert!(sim.port(PortId(0)).unwrap().has_container(c));
}

#[test]
fn ports_keep_first_visit_history() {
    let mut sim = two_port_sim(SimConfig::default());
    sim.create_port(PortId(2), 0.2, 0.2).unwrap();
    assert!(sim.sail(ShipId(0), PortId(1)));
    assert!(sim.sail(ShipId(0), PortId(2)));
    assert!(sim.sail(ShipId(0), PortId(1)));

    let p1 = sim.port(PortId(1)).unwrap();
    assert_eq!(p1.history(), &[ShipId(0)]);
    assert!(p1.is_docked(ShipId(0)));
    let p0 = sim.port(PortId(0)).unwrap();
    assert_eq!(p0.history(), &[ShipId(0)]);
    assert_eq!(p0.docked_ships().count(), 0);
    assert_eq!(sim.voyages().len(), 3);
}

// ===========================================================================
// Kyiv to Odesa demo run
// ===========================================================================

#[test]
fn kyiv_to_odesa_run() {
    let mut sim = Simulation::default();
    sim.create_port(PortId(0), KYIV.0, KYIV.1).unwrap();
    sim.create_port(PortId(1), ODESA.0, ODESA.1).unwrap();

    let c0 = sim.create_container(2000, None);
    let c1 = sim.create_container(5000, None);
    let c2 = sim.create_container(1000, Some(ContainerKind::Refrigerated));
    let c3 = sim.create_container(4000, Some(ContainerKind::Liquid));
    for c in [c0, c1, c2, c3] {
        sim.place_container_in_port(c, PortId(0)).unwrap();
    }
    assert_eq!(sim.container(c0).unwrap().kind(), ContainerKind::Basic);
    assert_eq!(sim.container(c1).unwrap().kind(), ContainerKind::Heavy);

    sim.create_ship(ShipId(0), PortId(0), coastal_specs(), 1000.0)
        .unwrap();
    assert!(sim.load(ShipId(0), c0));
    assert!(sim.load(ShipId(0), c1));
    assert!(!sim.load(ShipId(0), ContainerId(999)));
    sim.refuel(ShipId(0), 200.0).unwrap();

    // ~441 km at 0.5 + 5.0 + 15.0 per km is far more than 1200 fuel.
    assert!(!sim.sail(ShipId(0), PortId(1)));
    assert_eq!(sim.ship(ShipId(0)).unwrap().fuel(), 1200.0);
    assert_eq!(sim.ship(ShipId(0)).unwrap().current_port(), Some(PortId(0)));

    sim.refuel(ShipId(0), 10_000.0).unwrap();
    assert!(sim.sail(ShipId(0), PortId(1)));
    assert!(sim.unload(ShipId(0), c1));

    let odesa = sim.port(PortId(1)).unwrap().containers_by_type();
    assert_eq!(odesa.heavy, vec![c1]);
    let kyiv = sim.port(PortId(0)).unwrap().containers_by_type();
    assert_eq!(kyiv.refrigerated, vec![c2]);
    assert_eq!(kyiv.liquid, vec![c3]);
    let hold = sim.ship(ShipId(0)).unwrap().containers_by_type();
    assert_eq!(hold.basic, vec![c0]);
    assert!(sim.residency_violations().is_empty());
}
