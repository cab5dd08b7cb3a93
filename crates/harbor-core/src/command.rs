//! Serializable commands against a [`Simulation`].
//!
//! Each command maps one-to-one onto a registry operation. Scenario files
//! are plain lists of commands, and the demo driver is built from them.

use crate::container::ContainerKind;
use crate::id::{ContainerId, PortId, ShipId};
use crate::sim::{SimError, Simulation};
use crate::specs::ShipSpecs;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    CreatePort {
        id: PortId,
        lat: f64,
        lon: f64,
    },
    CreateShip {
        id: ShipId,
        port: PortId,
        specs: ShipSpecs,
        #[serde(default)]
        fuel: f64,
    },
    /// Without `kind`, the configured weight threshold picks Basic or Heavy.
    CreateContainer {
        weight: u32,
        #[serde(default)]
        kind: Option<ContainerKind>,
    },
    Place {
        container: ContainerId,
        port: PortId,
    },
    Load {
        ship: ShipId,
        container: ContainerId,
    },
    Unload {
        ship: ShipId,
        container: ContainerId,
    },
    Refuel {
        ship: ShipId,
        amount: f64,
    },
    Sail {
        ship: ShipId,
        to: PortId,
    },
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Done,
    Created(ContainerId),
    /// For load, unload and sail: whether the simulation accepted it.
    Accepted(bool),
}

impl Simulation {
    /// Apply one command.
    ///
    /// Refused loads, unloads and voyages are `Ok(Outcome::Accepted(false))`;
    /// invalid arguments to the other commands are `Err`.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, SimError> {
        let outcome = match *command {
            Command::CreatePort { id, lat, lon } => {
                self.create_port(id, lat, lon)?;
                Outcome::Done
            }
            Command::CreateShip {
                id,
                port,
                specs,
                fuel,
            } => {
                self.create_ship(id, port, specs, fuel)?;
                Outcome::Done
            }
            Command::CreateContainer { weight, kind } => {
                Outcome::Created(self.create_container(weight, kind))
            }
            Command::Place { container, port } => {
                self.place_container_in_port(container, port)?;
                Outcome::Done
            }
            Command::Load { ship, container } => Outcome::Accepted(self.load(ship, container)),
            Command::Unload { ship, container } => {
                Outcome::Accepted(self.unload(ship, container))
            }
            Command::Refuel { ship, amount } => {
                self.refuel(ship, amount)?;
                Outcome::Done
            }
            Command::Sail { ship, to } => Outcome::Accepted(self.sail(ship, to)),
        };
        Ok(outcome)
    }

    /// Apply commands in order, stopping at the first error.
    pub fn apply_all<'a>(
        &mut self,
        commands: impl IntoIterator<Item = &'a Command>,
    ) -> Result<Vec<Outcome>, SimError> {
        commands.into_iter().map(|c| self.apply(c)).collect()
    }
}
