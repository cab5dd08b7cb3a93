use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a port. Supplied by the caller when the port is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(pub u32);

/// Identifies a ship. Supplied by the caller when the ship is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Identifies a container. Allocated by [`ContainerIdAllocator`], never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out container IDs in strictly increasing order starting at 0.
///
/// Owned by the registry rather than living in global state, so two
/// simulations never share a counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerIdAllocator {
    next: u64,
}

impl ContainerIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next unused ID.
    pub fn allocate(&mut self) -> ContainerId {
        let id = ContainerId(self.next);
        self.next += 1;
        id
    }

    /// The ID the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> ContainerId {
        ContainerId(self.next)
    }

    /// Number of IDs handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}
