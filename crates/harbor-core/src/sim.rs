//! The simulation registry: owns every port, ship and container and routes
//! operations to them by ID.
//!
//! # Container residency
//!
//! Each container lives in exactly one of three places: unplaced (created
//! but not yet put anywhere), on a port's quay, or in a ship's hold. The
//! container value itself sits inside the owning port or ship; the registry
//! keeps a [`Location`] per container that is updated in the same call that
//! moves it. [`Simulation::residency_violations`] cross-checks the two.
//!
//! # Failure signalling
//!
//! `load`, `unload` and `sail` return `bool` because refusals are routine.
//! Their `try_*` counterparts return the typed reason. Invalid arguments
//! (duplicate IDs, out-of-range values, negative refuels) are always `Err`.

use crate::config::SimConfig;
use crate::container::{Container, ContainerKind};
use crate::id::{ContainerId, ContainerIdAllocator, PortId, ShipId};
use crate::port::Port;
use crate::ship::{LoadError, SailError, Ship, ShipError, UnloadError, Voyage};
use crate::specs::ShipSpecs;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where a container currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Unplaced,
    Port(PortId),
    Ship(ShipId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unplaced => f.write_str("unplaced"),
            Location::Port(id) => write!(f, "port {id}"),
            Location::Ship(id) => write!(f, "ship {id}"),
        }
    }
}

/// Registry entry: the container's value plus where it is held.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ContainerRecord {
    pub(crate) container: Container,
    pub(crate) location: Location,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by registry operations.
///
/// Refusals from the ship itself are wrapped unchanged, so callers can match
/// on the underlying [`LoadError`], [`UnloadError`] or [`SailError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("port {0} already exists")]
    DuplicatePort(PortId),
    #[error("ship {0} already exists")]
    DuplicateShip(ShipId),
    #[error("unknown port {0}")]
    UnknownPort(PortId),
    #[error("unknown ship {0}")]
    UnknownShip(ShipId),
    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),
    /// Latitude outside `[-90, 90]`, longitude outside `[-180, 180]`, or
    /// either one not finite.
    #[error("coordinates out of range: ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },
    /// The container is already on a quay or in a hold.
    #[error("container {container} is already placed ({location})")]
    AlreadyPlaced {
        container: ContainerId,
        location: Location,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Unload(#[from] UnloadError),
    #[error(transparent)]
    Sail(#[from] SailError),
    /// Invalid fuel on creation or refuel.
    #[error(transparent)]
    Ship(#[from] ShipError),
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Owns every port, ship and container, and the container ID allocator.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) ports: BTreeMap<PortId, Port>,
    pub(crate) ships: BTreeMap<ShipId, Ship>,
    pub(crate) containers: BTreeMap<ContainerId, ContainerRecord>,
    pub(crate) ids: ContainerIdAllocator,
    pub(crate) voyages: Vec<Voyage>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    /// An empty simulation. Ships created later take their rules from `config`.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            ports: BTreeMap::new(),
            ships: BTreeMap::new(),
            containers: BTreeMap::new(),
            ids: ContainerIdAllocator::new(),
            voyages: Vec::new(),
        }
    }

    /// The configuration this simulation was created with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a port at `lat`/`lon` degrees.
    pub fn create_port(&mut self, id: PortId, lat: f64, lon: f64) -> Result<(), SimError> {
        if self.ports.contains_key(&id) {
            return Err(SimError::DuplicatePort(id));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(SimError::InvalidCoordinates { lat, lon });
        }
        self.ports.insert(id, Port::new(id, lat, lon));
        tracing::debug!(port = %id, lat, lon, "port created");
        Ok(())
    }

    /// Create a ship docked at `port` with `fuel` in the tank.
    ///
    /// Fuel must be finite and non-negative.
    pub fn create_ship(
        &mut self,
        id: ShipId,
        port: PortId,
        specs: ShipSpecs,
        fuel: f64,
    ) -> Result<(), SimError> {
        if self.ships.contains_key(&id) {
            return Err(SimError::DuplicateShip(id));
        }
        let home = self.ports.get_mut(&port).ok_or(SimError::UnknownPort(port))?;
        let ship = Ship::new(id, Some(home), specs, fuel)?.with_rules(self.config.rules);
        self.ships.insert(id, ship);
        tracing::debug!(ship = %id, port = %port, fuel, "ship created");
        Ok(())
    }

    /// Create an unplaced container. Without an explicit kind the weight
    /// decides between Basic and Heavy.
    pub fn create_container(&mut self, weight: u32, kind: Option<ContainerKind>) -> ContainerId {
        let kind = kind
            .unwrap_or_else(|| ContainerKind::classify(weight, self.config.heavy_weight_threshold));
        let id = self.ids.allocate();
        self.containers.insert(
            id,
            ContainerRecord {
                container: Container::new(id, weight, kind),
                location: Location::Unplaced,
            },
        );
        tracing::trace!(container = %id, weight, %kind, "container created");
        id
    }

    /// Put an unplaced container on a port's quay.
    pub fn place_container_in_port(&mut self, id: ContainerId, port: PortId) -> Result<(), SimError> {
        let record = self
            .containers
            .get_mut(&id)
            .ok_or(SimError::UnknownContainer(id))?;
        let target = self.ports.get_mut(&port).ok_or(SimError::UnknownPort(port))?;
        if record.location != Location::Unplaced {
            return Err(SimError::AlreadyPlaced {
                container: id,
                location: record.location,
            });
        }
        let received = target.receive(record.container);
        debug_assert!(received, "unplaced container {id} already on the quay of port {port}");
        record.location = Location::Port(port);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cargo handling
    // -----------------------------------------------------------------------

    /// Load a container from the ship's current port, reporting why it was
    /// refused.
    pub fn try_load(&mut self, ship_id: ShipId, id: ContainerId) -> Result<(), SimError> {
        let ship = self
            .ships
            .get_mut(&ship_id)
            .ok_or(SimError::UnknownShip(ship_id))?;
        let record = self
            .containers
            .get_mut(&id)
            .ok_or(SimError::UnknownContainer(id))?;
        let port_id = ship
            .current_port()
            .ok_or(LoadError::AtSea { ship: ship_id })?;
        let port = self
            .ports
            .get_mut(&port_id)
            .ok_or(SimError::UnknownPort(port_id))?;
        ship.try_load(port, id)?;
        record.location = Location::Ship(ship_id);
        Ok(())
    }

    /// Load a container from the ship's current port. False on any refusal.
    pub fn load(&mut self, ship: ShipId, id: ContainerId) -> bool {
        accepted("load", self.try_load(ship, id))
    }

    /// Unload a container onto the ship's current port, reporting why it was
    /// refused.
    pub fn try_unload(&mut self, ship_id: ShipId, id: ContainerId) -> Result<(), SimError> {
        let ship = self
            .ships
            .get_mut(&ship_id)
            .ok_or(SimError::UnknownShip(ship_id))?;
        let record = self
            .containers
            .get_mut(&id)
            .ok_or(SimError::UnknownContainer(id))?;
        if !ship.has_container(id) {
            return Err(UnloadError::NotOnboard {
                container: id,
                ship: ship_id,
            }
            .into());
        }
        let port_id = ship
            .current_port()
            .ok_or(UnloadError::AtSea { ship: ship_id })?;
        let port = self
            .ports
            .get_mut(&port_id)
            .ok_or(SimError::UnknownPort(port_id))?;
        ship.try_unload(port, id)?;
        record.location = Location::Port(port_id);
        Ok(())
    }

    /// Unload a container onto the ship's current port. False on any refusal.
    pub fn unload(&mut self, ship: ShipId, id: ContainerId) -> bool {
        accepted("unload", self.try_unload(ship, id))
    }

    // -----------------------------------------------------------------------
    // Fuel and voyages
    // -----------------------------------------------------------------------

    /// Add fuel to a ship. The amount must be finite and non-negative.
    pub fn refuel(&mut self, ship_id: ShipId, amount: f64) -> Result<(), SimError> {
        let ship = self
            .ships
            .get_mut(&ship_id)
            .ok_or(SimError::UnknownShip(ship_id))?;
        ship.refuel(amount)?;
        tracing::debug!(ship = %ship_id, amount, fuel = ship.fuel(), "refuelled");
        Ok(())
    }

    /// Sail a ship from its current port to `destination`.
    ///
    /// Sailing to the port the ship is already at is a zero-length voyage:
    /// it succeeds, changes nothing, and is not logged.
    pub fn try_sail(&mut self, ship_id: ShipId, destination: PortId) -> Result<Voyage, SimError> {
        let ship = self
            .ships
            .get_mut(&ship_id)
            .ok_or(SimError::UnknownShip(ship_id))?;
        if !self.ports.contains_key(&destination) {
            return Err(SimError::UnknownPort(destination));
        }
        let origin_id = ship
            .current_port()
            .ok_or(SailError::AtSea { ship: ship_id })?;
        if origin_id == destination {
            return Ok(Voyage {
                ship: ship_id,
                from: origin_id,
                to: destination,
                distance_km: 0.0,
                fuel_used: 0.0,
                discharged: Vec::new(),
            });
        }

        // Both ports are needed mutably; lift the destination out of the map
        // for the duration of the voyage and always put it back.
        let mut dest = self
            .ports
            .remove(&destination)
            .ok_or(SimError::UnknownPort(destination))?;
        let result = match self.ports.get_mut(&origin_id) {
            Some(origin) => ship.try_sail_to(origin, &mut dest).map_err(SimError::from),
            None => Err(SimError::UnknownPort(origin_id)),
        };
        self.ports.insert(destination, dest);
        let voyage = result?;

        for id in &voyage.discharged {
            if let Some(record) = self.containers.get_mut(id) {
                record.location = Location::Port(destination);
            }
        }
        tracing::info!(
            ship = %ship_id,
            from = %voyage.from,
            to = %voyage.to,
            distance_km = voyage.distance_km,
            fuel_used = voyage.fuel_used,
            fuel_left = ship.fuel(),
            discharged = voyage.discharged.len(),
            "voyage completed"
        );
        self.voyages.push(voyage.clone());
        Ok(voyage)
    }

    /// Sail to `destination`. False if the ship, port or fuel is not up to it.
    pub fn sail(&mut self, ship: ShipId, destination: PortId) -> bool {
        accepted("sail", self.try_sail(ship, destination).map(|_| ()))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Look up a port by ID.
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(&id)
    }

    /// Look up a ship by ID.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// Look up a container by ID, wherever it is held.
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id).map(|r| &r.container)
    }

    /// Where a container is, or `None` if the ID was never allocated.
    pub fn location(&self, id: ContainerId) -> Option<Location> {
        self.containers.get(&id).map(|r| r.location)
    }

    /// Ports in ascending ID order.
    pub fn ports(&self) -> impl Iterator<Item = &Port> + '_ {
        self.ports.values()
    }

    /// Ships in ascending ID order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.values()
    }

    /// Number of containers ever created.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Completed voyages, oldest first.
    pub fn voyages(&self) -> &[Voyage] {
        &self.voyages
    }

    /// Containers whose recorded location disagrees with where they are
    /// actually held, or that are held in more than one place.
    pub fn residency_violations(&self) -> Vec<ContainerId> {
        let mut violations = Vec::new();
        for (&id, record) in &self.containers {
            let at_ports: Vec<PortId> = self
                .ports
                .values()
                .filter(|p| p.has_container(id))
                .map(Port::id)
                .collect();
            let on_ships: Vec<ShipId> = self
                .ships
                .values()
                .filter(|s| s.has_container(id))
                .map(Ship::id)
                .collect();
            let consistent = match record.location {
                Location::Unplaced => at_ports.is_empty() && on_ships.is_empty(),
                Location::Port(p) => at_ports == [p] && on_ships.is_empty(),
                Location::Ship(s) => at_ports.is_empty() && on_ships == [s],
            };
            if !consistent {
                violations.push(id);
            }
        }
        violations
    }
}

/// Collapse a refusal to `false`, logging the reason.
fn accepted(op: &'static str, result: Result<(), SimError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(op, error = %err, "operation refused");
            false
        }
    }
}
