//! Container variants and their fuel contribution.
//!
//! A container's kind is a closed enum. Refrigerated and Liquid containers
//! are specialisations of Heavy; [`ContainerKind::is_heavy_class`] is the
//! single place that relationship lives.

use crate::id::ContainerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalises `weight * rate` into per-kilometre fuel units.
pub const CONSUMPTION_SCALE: f64 = 1.0 / 1000.0;

// ---------------------------------------------------------------------------
// Container kind
// ---------------------------------------------------------------------------

/// The four container variants.
///
/// Data files accept the same single-letter shorthand as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    #[serde(alias = "b", alias = "B")]
    Basic,
    #[serde(alias = "h", alias = "H")]
    Heavy,
    #[serde(alias = "r", alias = "R")]
    Refrigerated,
    #[serde(alias = "l", alias = "L")]
    Liquid,
}

impl ContainerKind {
    /// Every kind, in reporting order.
    pub const ALL: [ContainerKind; 4] = [
        ContainerKind::Basic,
        ContainerKind::Heavy,
        ContainerKind::Refrigerated,
        ContainerKind::Liquid,
    ];

    /// Fuel rate per unit of weight, before scaling.
    pub fn rate(self) -> f64 {
        match self {
            ContainerKind::Basic => 2.50,
            ContainerKind::Heavy => 3.00,
            ContainerKind::Refrigerated => 5.00,
            ContainerKind::Liquid => 4.00,
        }
    }

    /// Heavy, Refrigerated and Liquid all belong to the heavy class.
    pub fn is_heavy_class(self) -> bool {
        matches!(
            self,
            ContainerKind::Heavy | ContainerKind::Refrigerated | ContainerKind::Liquid
        )
    }

    /// Tag used in reports.
    pub fn type_name(self) -> &'static str {
        match self {
            ContainerKind::Basic => "basic",
            ContainerKind::Heavy => "heavy",
            ContainerKind::Refrigerated => "refrigerated",
            ContainerKind::Liquid => "liquid",
        }
    }

    /// Kind for a container created without an explicit kind: Basic up to
    /// and including `heavy_threshold`, Heavy above it.
    pub fn classify(weight: u32, heavy_threshold: u32) -> Self {
        if weight <= heavy_threshold {
            ContainerKind::Basic
        } else {
            ContainerKind::Heavy
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Error returned when parsing an unknown kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown container kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for ContainerKind {
    type Err = ParseKindError;

    /// Accepts the full tag (`"liquid"`) or its single-letter shorthand (`"L"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "basic" => Ok(ContainerKind::Basic),
            "h" | "heavy" => Ok(ContainerKind::Heavy),
            "r" | "refrigerated" => Ok(ContainerKind::Refrigerated),
            "l" | "liquid" => Ok(ContainerKind::Liquid),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// An immutable container. Where it currently sits is tracked by whoever
/// holds it, not by the container itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    id: ContainerId,
    weight: u32,
    kind: ContainerKind,
}

impl Container {
    pub fn new(id: ContainerId, weight: u32, kind: ContainerKind) -> Self {
        Self { id, weight, kind }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// This container's contribution to a ship's fuel burn per kilometre.
    pub fn consumption(&self) -> f64 {
        self.weight as f64 * self.kind.rate() * CONSUMPTION_SCALE
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

// ---------------------------------------------------------------------------
// Grouping by kind
// ---------------------------------------------------------------------------

/// Container IDs partitioned by kind, each list in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainersByType {
    pub basic: Vec<ContainerId>,
    pub heavy: Vec<ContainerId>,
    pub refrigerated: Vec<ContainerId>,
    pub liquid: Vec<ContainerId>,
}

impl ContainersByType {
    pub fn from_containers<'a>(containers: impl IntoIterator<Item = &'a Container>) -> Self {
        let mut out = Self::default();
        for c in containers {
            out.list_mut(c.kind()).push(c.id());
        }
        for kind in ContainerKind::ALL {
            out.list_mut(kind).sort_unstable();
        }
        out
    }

    pub fn get(&self, kind: ContainerKind) -> &[ContainerId] {
        match kind {
            ContainerKind::Basic => &self.basic,
            ContainerKind::Heavy => &self.heavy,
            ContainerKind::Refrigerated => &self.refrigerated,
            ContainerKind::Liquid => &self.liquid,
        }
    }

    fn list_mut(&mut self, kind: ContainerKind) -> &mut Vec<ContainerId> {
        match kind {
            ContainerKind::Basic => &mut self.basic,
            ContainerKind::Heavy => &mut self.heavy,
            ContainerKind::Refrigerated => &mut self.refrigerated,
            ContainerKind::Liquid => &mut self.liquid,
        }
    }

    pub fn total(&self) -> usize {
        self.basic.len() + self.heavy.len() + self.refrigerated.len() + self.liquid.len()
    }
}
