//! Ports: a fixed location holding containers and the ships docked there.

use crate::container::{Container, ContainersByType};
use crate::id::{ContainerId, PortId, ShipId};
use std::collections::{BTreeMap, BTreeSet};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A port: its location, the containers on its quay and the ships docked there.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    id: PortId,
    latitude: f64,
    longitude: f64,
    containers: BTreeMap<ContainerId, Container>,
    docked: BTreeSet<ShipId>,
    /// Every ship that ever docked here, in order of first visit.
    history: Vec<ShipId>,
}

impl Port {
    pub fn new(id: PortId, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            containers: BTreeMap::new(),
            docked: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance_to(&self, other: &Port) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    // -----------------------------------------------------------------------
    // Ship bookkeeping
    // -----------------------------------------------------------------------

    pub fn record_arrival(&mut self, ship: ShipId) {
        self.docked.insert(ship);
        if !self.history.contains(&ship) {
            self.history.push(ship);
        }
    }

    pub fn record_departure(&mut self, ship: ShipId) {
        self.docked.remove(&ship);
    }

    pub fn is_docked(&self, ship: ShipId) -> bool {
        self.docked.contains(&ship)
    }

    /// Ships currently docked, ascending by ID.
    pub fn docked_ships(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.docked.iter().copied()
    }

    pub fn history(&self) -> &[ShipId] {
        &self.history
    }

    // -----------------------------------------------------------------------
    // Containers
    // -----------------------------------------------------------------------

    /// Put a container on the quay. Returns false if it is already here.
    ///
    /// The caller must make sure the container is not held anywhere else.
    pub fn receive(&mut self, container: Container) -> bool {
        if self.containers.contains_key(&container.id()) {
            return false;
        }
        self.containers.insert(container.id(), container);
        true
    }

    /// Remove a container from the quay, handing ownership to the caller.
    pub(crate) fn release(&mut self, id: ContainerId) -> Option<Container> {
        self.containers.remove(&id)
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn has_container(&self, id: ContainerId) -> bool {
        self.containers.contains_key(&id)
    }

    /// Containers on the quay, ascending by ID.
    pub fn containers(&self) -> impl Iterator<Item = &Container> + '_ {
        self.containers.values()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn containers_by_type(&self) -> ContainersByType {
        ContainersByType::from_containers(self.containers.values())
    }
}
