//! Staffing formulas — headcount from volume, and the two inverses.
//!
//! This is the simplified workforce heuristic, not Erlang-C: the
//! service-level target enters only as a headcount multiplier of
//! `1 + (1 - L)`. Requirements round up, capacities round down.

use crate::{
    params::{CapacityParams, StaffingParams},
    types::{AgentCount, CallVolume},
};
use serde::{Deserialize, Serialize};

/// Half-width of the expected service-level band reported alongside
/// a point estimate.
pub const SERVICE_LEVEL_BAND: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequirement {
    pub without_shrinkage: AgentCount,
    pub with_shrinkage:    AgentCount,
}

/// Agents needed to take `call_volume` calls in one shift.
pub fn calculate_agents(call_volume: CallVolume, params: &StaffingParams) -> AgentRequirement {
    let capacity = params.capacity();
    let per_agent = capacity.calls_per_shift();

    let without_shrinkage =
        (call_volume as f64 / per_agent * params.service_level_inflation()).ceil() as AgentCount;

    let base = without_shrinkage as f64;
    let with_shrinkage = (base + base * capacity.shrinkage()).ceil() as AgentCount;

    log::debug!(
        "formulas: volume={call_volume} per_agent={per_agent:.2} agents={without_shrinkage}/{with_shrinkage}"
    );

    AgentRequirement { without_shrinkage, with_shrinkage }
}

/// Service level achieved by `agents` against `call_volume`, clamped
/// to [0, 1]. A zero volume is fully served.
pub fn calculate_service_level(call_volume: CallVolume, capacity: &CapacityParams, agents: AgentCount) -> f64 {
    let max_calls = capacity.effective_agents(agents) * capacity.calls_per_shift();
    if call_volume == 0 {
        return 1.0;
    }
    (max_calls / call_volume as f64).clamp(0.0, 1.0)
}

/// Calls `agents` can take in a shift while holding the target
/// service level. Truncates toward zero.
pub fn calculate_calls_by_agents(agents: AgentCount, params: &StaffingParams) -> CallVolume {
    let capacity = params.capacity();
    let raw = capacity.effective_agents(agents) * capacity.calls_per_shift();
    (raw / params.service_level_inflation()) as CallVolume
}

/// Expected range around a service-level estimate, kept inside [0, 1].
pub fn service_level_range(service_level: f64) -> (f64, f64) {
    (
        (service_level - SERVICE_LEVEL_BAND).max(0.0),
        (service_level + SERVICE_LEVEL_BAND).min(1.0),
    )
}
