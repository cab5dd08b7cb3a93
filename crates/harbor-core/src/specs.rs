use serde::{Deserialize, Serialize};

/// Capacity and consumption figures for a class of ship.
///
/// Count limits of zero mean "unlimited". The weight capacity always binds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpecs {
    pub total_weight_capacity: u64,
    pub max_all_containers: u32,
    pub max_heavy_containers: u32,
    pub max_refrigerated_containers: u32,
    pub max_liquid_containers: u32,
    /// Hull burn per kilometre, excluding cargo.
    pub fuel_consumption_per_km: f64,
}

impl ShipSpecs {
    pub fn new(
        total_weight_capacity: u64,
        max_all_containers: u32,
        max_heavy_containers: u32,
        max_refrigerated_containers: u32,
        max_liquid_containers: u32,
        fuel_consumption_per_km: f64,
    ) -> Self {
        Self {
            total_weight_capacity,
            max_all_containers,
            max_heavy_containers,
            max_refrigerated_containers,
            max_liquid_containers,
            fuel_consumption_per_km,
        }
    }
}

/// Whether one more item would break `limit`, with 0 meaning no limit.
pub(crate) fn exceeds_limit(limit: u32, current: u32) -> bool {
    limit != 0 && current >= limit
}
