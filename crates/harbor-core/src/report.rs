//! Plain-text dump of simulation state.

use crate::container::{ContainerKind, ContainersByType};
use crate::id::ContainerId;
use crate::sim::Simulation;
use std::fmt;

/// Borrowing view that renders every port, its quay and its docked ships.
pub struct StateReport<'a> {
    sim: &'a Simulation,
}

impl Simulation {
    pub fn report(&self) -> StateReport<'_> {
        StateReport { sim: self }
    }
}

struct IdList<'a>(&'a [ContainerId]);

impl fmt::Display for IdList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("]")
    }
}

fn write_groups(f: &mut fmt::Formatter<'_>, indent: &str, groups: &ContainersByType) -> fmt::Result {
    for kind in ContainerKind::ALL {
        writeln!(f, "{indent}{kind}: {}", IdList(groups.get(kind)))?;
    }
    Ok(())
}

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for port in self.sim.ports() {
            writeln!(
                f,
                "Port {}: lat={:.2}, lon={:.2}",
                port.id(),
                port.latitude(),
                port.longitude()
            )?;
            writeln!(f, "  Containers at port:")?;
            write_groups(f, "    ", &port.containers_by_type())?;

            let mut docked = port.docked_ships().peekable();
            if docked.peek().is_none() {
                writeln!(f, "  (no ships)")?;
                continue;
            }
            writeln!(f, "  Ships in port:")?;
            for ship in docked.filter_map(|id| self.sim.ship(id)) {
                writeln!(f, "    Ship {}: fuel_left={:.2}", ship.id(), ship.fuel())?;
                write_groups(f, "      ", &ship.containers_by_type())?;
            }
        }
        Ok(())
    }
}
