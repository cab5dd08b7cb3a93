//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::config::SimConfig;
use crate::container::ContainerKind;
use crate::id::{ContainerId, PortId, ShipId};
use crate::port::Port;
use crate::sim::Simulation;
use crate::specs::ShipSpecs;

// ===========================================================================
// Specs
// ===========================================================================

/// Specs that never get in the way: large capacity, no count limits, no hull burn.
pub fn roomy_specs() -> ShipSpecs {
    ShipSpecs::new(1_000_000, 0, 0, 0, 0, 0.0)
}

/// The ship class used by the two-port scenario.
pub fn small_feeder_specs() -> ShipSpecs {
    ShipSpecs::new(10_000, 10, 10, 10, 10, 0.1)
}

/// The ship class used by the Kyiv to Odesa demo run.
pub fn coastal_specs() -> ShipSpecs {
    ShipSpecs::new(20_000, 10, 5, 2, 2, 0.5)
}

// ===========================================================================
// Ports
// ===========================================================================

/// Two ports near the equator, about 15.7 km apart.
pub fn equator_ports() -> (Port, Port) {
    (Port::new(PortId(0), 0.0, 0.0), Port::new(PortId(1), 0.1, 0.1))
}

pub const KYIV: (f64, f64) = (50.45, 30.52);
pub const ODESA: (f64, f64) = (46.48, 30.73);

// ===========================================================================
// Simulations
// ===========================================================================

/// Two equator ports (0 and 1) and ship 0 docked at port 0 with 1000 fuel.
pub fn two_port_sim(config: SimConfig) -> Simulation {
    let mut sim = Simulation::new(config);
    sim.create_port(PortId(0), 0.0, 0.0).unwrap();
    sim.create_port(PortId(1), 0.1, 0.1).unwrap();
    sim.create_ship(ShipId(0), PortId(0), small_feeder_specs(), 1000.0)
        .unwrap();
    sim
}

/// Create a container of the given kind and place it at `port`.
pub fn stocked(sim: &mut Simulation, port: PortId, weight: u32, kind: ContainerKind) -> ContainerId {
    let id = sim.create_container(weight, Some(kind));
    sim.place_container_in_port(id, port).unwrap();
    id
}
