//! Ships: capacity-checked loading and fuel-limited voyages.
//!
//! A ship never holds a reference to a port. It remembers the [`PortId`] it
//! is docked at, and every dock-relative operation takes the port itself as
//! an argument and checks it is the right one. Containers move by value
//! between the port's quay and the ship's hold, so a container is only ever
//! in one place.

use crate::config::{ArrivalPolicy, FuelPolicy, HeavyLimitPolicy, Rules};
use crate::container::{CONSUMPTION_SCALE, Container, ContainerKind, ContainersByType};
use crate::id::{ContainerId, PortId, ShipId};
use crate::port::Port;
use crate::specs::{ShipSpecs, exceeds_limit};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a container could not be loaded. Nothing changes when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("ship {ship} is at sea")]
    AtSea { ship: ShipId },
    #[error("ship {ship} is docked at port {docked}, not port {port}")]
    WrongPort {
        ship: ShipId,
        docked: PortId,
        port: PortId,
    },
    #[error("container {container} is not at port {port}")]
    NotAtPort { container: ContainerId, port: PortId },
    #[error("adding {weight} to {onboard} onboard exceeds weight capacity {capacity}")]
    OverWeight {
        weight: u64,
        onboard: u64,
        capacity: u64,
    },
    #[error("container limit of {limit} reached")]
    CountLimit { limit: u32 },
    #[error("{kind} container limit of {limit} reached")]
    KindLimit { kind: ContainerKind, limit: u32 },
}

/// Why a container could not be unloaded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnloadError {
    #[error("ship {ship} is at sea")]
    AtSea { ship: ShipId },
    #[error("ship {ship} is docked at port {docked}, not port {port}")]
    WrongPort {
        ship: ShipId,
        docked: PortId,
        port: PortId,
    },
    #[error("container {container} is not aboard ship {ship}")]
    NotOnboard { container: ContainerId, ship: ShipId },
}

/// Why a voyage could not start. Nothing changes when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SailError {
    #[error("ship {ship} is at sea")]
    AtSea { ship: ShipId },
    #[error("ship {ship} is docked at port {docked}, not port {origin}")]
    WrongOrigin {
        ship: ShipId,
        docked: PortId,
        origin: PortId,
    },
    #[error("voyage needs {required:.3} fuel, ship has {available:.3}")]
    InsufficientFuel { required: f64, available: f64 },
}

/// Invalid arguments to ship operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShipError {
    #[error("fuel must be finite and non-negative, got {0}")]
    InvalidFuel(f64),
    #[error("refuel amount must be finite and non-negative, got {0}")]
    InvalidRefuel(f64),
}

// ---------------------------------------------------------------------------
// Voyage
// ---------------------------------------------------------------------------

/// A completed voyage.
#[derive(Debug, Clone, PartialEq)]
pub struct Voyage {
    pub ship: ShipId,
    pub from: PortId,
    pub to: PortId,
    pub distance_km: f64,
    pub fuel_used: f64,
    /// Containers moved onto the destination quay on arrival. Empty unless
    /// the ship runs under [`ArrivalPolicy::DischargeAll`].
    pub discharged: Vec<ContainerId>,
}

// ---------------------------------------------------------------------------
// Cargo tally
// ---------------------------------------------------------------------------

/// Counts over a ship's hold, used by the capacity checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CargoTally {
    pub total: u32,
    pub weight: u64,
    /// Heavy, Refrigerated and Liquid together.
    pub heavy_class: u32,
    pub refrigerated: u32,
    pub liquid: u32,
}

impl CargoTally {
    fn of<'a>(containers: impl IntoIterator<Item = &'a Container>) -> Self {
        let mut t = Self::default();
        for c in containers {
            t.total += 1;
            t.weight += u64::from(c.weight());
            if c.kind().is_heavy_class() {
                t.heavy_class += 1;
            }
            match c.kind() {
                ContainerKind::Basic | ContainerKind::Heavy => {}
                ContainerKind::Refrigerated => t.refrigerated += 1,
                ContainerKind::Liquid => t.liquid += 1,
            }
        }
        t
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// A ship: its specs and rules, its fuel, where it is docked and its hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    id: ShipId,
    fuel: f64,
    port: Option<PortId>,
    specs: ShipSpecs,
    rules: Rules,
    onboard: BTreeMap<ContainerId, Container>,
}

impl Ship {
    /// Create a ship, docking it at `initial_port` if one is given.
    ///
    /// Fails without touching the port if `fuel` is negative or not finite.
    pub fn new(
        id: ShipId,
        initial_port: Option<&mut Port>,
        specs: ShipSpecs,
        fuel: f64,
    ) -> Result<Self, ShipError> {
        if !fuel.is_finite() || fuel < 0.0 {
            return Err(ShipError::InvalidFuel(fuel));
        }
        let port = initial_port.map(|p| {
            p.record_arrival(id);
            p.id()
        });
        Ok(Self {
            id,
            fuel,
            port,
            specs,
            rules: Rules::default(),
            onboard: BTreeMap::new(),
        })
    }

    /// Replace the default rules.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// The port the ship is docked at, or `None` at sea.
    pub fn current_port(&self) -> Option<PortId> {
        self.port
    }

    pub fn is_docked(&self) -> bool {
        self.port.is_some()
    }

    pub fn specs(&self) -> &ShipSpecs {
        &self.specs
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn has_container(&self, id: ContainerId) -> bool {
        self.onboard.contains_key(&id)
    }

    /// Containers in the hold, ascending by ID.
    pub fn containers(&self) -> impl Iterator<Item = &Container> + '_ {
        self.onboard.values()
    }

    pub fn containers_by_type(&self) -> ContainersByType {
        ContainersByType::from_containers(self.onboard.values())
    }

    pub fn tally(&self) -> CargoTally {
        CargoTally::of(self.onboard.values())
    }

    /// Sum of the onboard containers' per-kilometre consumption.
    pub fn cargo_consumption_per_km(&self) -> f64 {
        self.onboard.values().map(Container::consumption).sum()
    }

    /// Burn per kilometre under the ship's fuel policy.
    ///
    /// Hull-only voyages scale the hull rate by [`CONSUMPTION_SCALE`], the
    /// same factor applied to container weight.
    pub fn fuel_per_km(&self) -> f64 {
        match self.rules.voyage_fuel {
            FuelPolicy::HullAndCargo => {
                self.specs.fuel_consumption_per_km + self.cargo_consumption_per_km()
            }
            FuelPolicy::HullOnly => self.specs.fuel_consumption_per_km * CONSUMPTION_SCALE,
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    fn ensure_docked_at(&self, port: &Port) -> Result<(), LoadError> {
        match self.port {
            None => Err(LoadError::AtSea { ship: self.id }),
            Some(docked) if docked != port.id() => Err(LoadError::WrongPort {
                ship: self.id,
                docked,
                port: port.id(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Run every load check without moving anything.
    pub fn check_load<'p>(&self, port: &'p Port, id: ContainerId) -> Result<&'p Container, LoadError> {
        self.ensure_docked_at(port)?;
        let container = port.container(id).ok_or(LoadError::NotAtPort {
            container: id,
            port: port.id(),
        })?;

        let tally = self.tally();
        let weight = u64::from(container.weight());
        if tally.weight + weight > self.specs.total_weight_capacity {
            return Err(LoadError::OverWeight {
                weight,
                onboard: tally.weight,
                capacity: self.specs.total_weight_capacity,
            });
        }
        if exceeds_limit(self.specs.max_all_containers, tally.total) {
            return Err(LoadError::CountLimit {
                limit: self.specs.max_all_containers,
            });
        }
        self.check_kind_limits(container.kind(), &tally)?;
        Ok(container)
    }

    fn check_kind_limits(&self, kind: ContainerKind, tally: &CargoTally) -> Result<(), LoadError> {
        let heavy_limit = self.specs.max_heavy_containers;
        let heavy_binds = match self.rules.heavy_limits {
            HeavyLimitPolicy::Cumulative => {
                kind.is_heavy_class() && exceeds_limit(heavy_limit, tally.heavy_class)
            }
            HeavyLimitPolicy::Exclusive => {
                kind == ContainerKind::Heavy && exceeds_limit(heavy_limit, tally.heavy_class)
            }
        };
        if heavy_binds {
            return Err(LoadError::KindLimit {
                kind: ContainerKind::Heavy,
                limit: heavy_limit,
            });
        }

        let (limit, current) = match kind {
            ContainerKind::Refrigerated => (self.specs.max_refrigerated_containers, tally.refrigerated),
            ContainerKind::Liquid => (self.specs.max_liquid_containers, tally.liquid),
            ContainerKind::Basic | ContainerKind::Heavy => return Ok(()),
        };
        if exceeds_limit(limit, current) {
            return Err(LoadError::KindLimit { kind, limit });
        }
        Ok(())
    }

    /// Move a container from `port`'s quay into the hold.
    pub fn try_load(&mut self, port: &mut Port, id: ContainerId) -> Result<(), LoadError> {
        self.check_load(port, id)?;
        let container = port.release(id).ok_or(LoadError::NotAtPort {
            container: id,
            port: port.id(),
        })?;
        self.onboard.insert(id, container);
        tracing::trace!(ship = %self.id, port = %port.id(), container = %id, "container loaded");
        Ok(())
    }

    pub fn load(&mut self, port: &mut Port, id: ContainerId) -> bool {
        self.try_load(port, id).is_ok()
    }

    /// Move a container from the hold onto the quay of the port the ship is
    /// docked at.
    pub fn try_unload(&mut self, port: &mut Port, id: ContainerId) -> Result<(), UnloadError> {
        if !self.onboard.contains_key(&id) {
            return Err(UnloadError::NotOnboard {
                container: id,
                ship: self.id,
            });
        }
        match self.port {
            None => return Err(UnloadError::AtSea { ship: self.id }),
            Some(docked) if docked != port.id() => {
                return Err(UnloadError::WrongPort {
                    ship: self.id,
                    docked,
                    port: port.id(),
                });
            }
            Some(_) => {}
        }
        if let Some(container) = self.onboard.remove(&id) {
            let received = port.receive(container);
            debug_assert!(received, "container {id} already on the quay of port {}", port.id());
        }
        tracing::trace!(ship = %self.id, port = %port.id(), container = %id, "container unloaded");
        Ok(())
    }

    pub fn unload(&mut self, port: &mut Port, id: ContainerId) -> bool {
        self.try_unload(port, id).is_ok()
    }

    // -----------------------------------------------------------------------
    // Fuel and voyages
    // -----------------------------------------------------------------------

    /// Add fuel. There is no tank limit.
    pub fn refuel(&mut self, amount: f64) -> Result<(), ShipError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ShipError::InvalidRefuel(amount));
        }
        self.fuel += amount;
        Ok(())
    }

    /// Fuel a voyage from `origin` to `destination` would burn right now.
    pub fn fuel_required(&self, origin: &Port, destination: &Port) -> f64 {
        origin.distance_to(destination) * self.fuel_per_km()
    }

    /// Sail from `origin`, where the ship must be docked, to `destination`.
    ///
    /// Either the whole voyage happens or nothing changes.
    pub fn try_sail_to(&mut self, origin: &mut Port, destination: &mut Port) -> Result<Voyage, SailError> {
        let docked = self.port.ok_or(SailError::AtSea { ship: self.id })?;
        if docked != origin.id() {
            return Err(SailError::WrongOrigin {
                ship: self.id,
                docked,
                origin: origin.id(),
            });
        }

        let distance_km = origin.distance_to(destination);
        let required = distance_km * self.fuel_per_km();
        if required.is_nan() || self.fuel + self.rules.fuel_epsilon < required {
            return Err(SailError::InsufficientFuel {
                required,
                available: self.fuel,
            });
        }

        // Epsilon slack may take the tank a hair below zero.
        self.fuel = (self.fuel - required).max(0.0);
        origin.record_departure(self.id);
        self.port = Some(destination.id());
        destination.record_arrival(self.id);

        let mut discharged = Vec::new();
        if self.rules.arrival == ArrivalPolicy::DischargeAll {
            for (id, container) in std::mem::take(&mut self.onboard) {
                let received = destination.receive(container);
                debug_assert!(received, "container {id} already on the destination quay");
                discharged.push(id);
            }
        }

        Ok(Voyage {
            ship: self.id,
            from: origin.id(),
            to: destination.id(),
            distance_km,
            fuel_used: required,
            discharged,
        })
    }

    pub fn sail_to(&mut self, origin: &mut Port, destination: &mut Port) -> bool {
        self.try_sail_to(origin, destination).is_ok()
    }
}
