//! Harbor Core -- a small discrete-event simulation of cargo logistics.
//!
//! Ports hold containers, ships load and unload them under capacity limits,
//! and ships burn fuel sailing between ports along great-circle routes.
//!
//! # Fuel model
//!
//! A voyage costs `distance_km * (hull_rate + sum(container.consumption()))`,
//! where a container's consumption is `weight * rate(kind) * 0.001`. Distance
//! comes from the haversine formula on a 6371 km sphere.
//!
//! # Atomicity
//!
//! Every operation either passes all of its checks and applies all of its
//! changes, or changes nothing. Refusals that are part of normal play (full
//! hold, not enough fuel) are reported as `false` or as a typed error from
//! the matching `try_*` method.
//!
//! ```rust,ignore
//! let mut sim = Simulation::default();
//! sim.create_port(PortId(0), 50.45, 30.52)?;
//! sim.create_port(PortId(1), 46.48, 30.73)?;
//! let crate_id = sim.create_container(2000, None);
//! sim.place_container_in_port(crate_id, PortId(0))?;
//! sim.create_ship(ShipId(0), PortId(0), specs, 1000.0)?;
//! assert!(sim.load(ShipId(0), crate_id));
//! assert!(sim.sail(ShipId(0), PortId(1)));
//! ```
//!
//! # Key Types
//!
//! - [`container::Container`] / [`container::ContainerKind`] -- cargo and its fuel rate.
//! - [`port::Port`] -- location, quay, docked ships and visit history.
//! - [`ship::Ship`] -- capacity checks, loading and voyages.
//! - [`sim::Simulation`] -- registry that owns everything and allocates IDs.
//! - [`config::SimConfig`] -- rule knobs, loadable from TOML.
//! - [`command::Command`] -- serializable operations for scripted runs.

pub mod command;
pub mod config;
pub mod container;
pub mod id;
pub mod port;
pub mod report;
#[cfg(feature = "data-loader")]
pub mod scenario;
pub mod ship;
pub mod sim;
pub mod specs;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
