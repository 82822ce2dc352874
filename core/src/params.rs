//! Staffing parameters — the immutable inputs shared by every formula call.
//!
//! Values are validated once at construction; the formulas never
//! re-check them. Build a new value when an input changes.

use crate::error::{StaffingError, StaffingResult};
use serde::{Deserialize, Serialize};

/// Paid hours in one agent shift.
pub const SHIFT_HOURS: f64 = 7.0;

/// Handle time, occupancy and shrinkage: everything needed to turn a
/// headcount into call capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityParams {
    handle_time_secs: f64,
    occupancy:        f64,
    shrinkage:        f64,
}

impl CapacityParams {
    /// - `handle_time_secs`: average seconds per call, > 0
    /// - `occupancy`: fraction in (0, 1]
    /// - `shrinkage`: fraction in [0, 1)
    pub fn new(handle_time_secs: f64, occupancy: f64, shrinkage: f64) -> StaffingResult<Self> {
        if !handle_time_secs.is_finite() || handle_time_secs <= 0.0 {
            return Err(invalid("handle_time_secs", handle_time_secs, "must be a positive number of seconds"));
        }
        if !occupancy.is_finite() || occupancy <= 0.0 || occupancy > 1.0 {
            return Err(invalid("occupancy", occupancy, "must be in (0, 1]"));
        }
        if !shrinkage.is_finite() || !(0.0..1.0).contains(&shrinkage) {
            return Err(invalid("shrinkage", shrinkage, "must be in [0, 1)"));
        }
        Ok(Self { handle_time_secs, occupancy, shrinkage })
    }

    /// Integer inputs as entered on the dashboard controls:
    /// handle time >= 1s, occupancy 50–100%, shrinkage 0–99%.
    pub fn from_percentages(handle_time_secs: u32, occupancy_pct: u32, shrinkage_pct: u32) -> StaffingResult<Self> {
        if handle_time_secs < 1 {
            return Err(invalid("handle_time_secs", handle_time_secs as f64, "must be at least 1 second"));
        }
        if !(50..=100).contains(&occupancy_pct) {
            return Err(invalid("occupancy_pct", occupancy_pct as f64, "must be between 50 and 100"));
        }
        if shrinkage_pct > 99 {
            return Err(invalid("shrinkage_pct", shrinkage_pct as f64, "must be between 0 and 99"));
        }
        Self::new(
            handle_time_secs as f64,
            occupancy_pct as f64 / 100.0,
            shrinkage_pct as f64 / 100.0,
        )
    }

    pub fn handle_time_secs(&self) -> f64 { self.handle_time_secs }
    pub fn occupancy(&self) -> f64        { self.occupancy }
    pub fn shrinkage(&self) -> f64        { self.shrinkage }

    /// Calls one agent can take in an hour of pure talk time.
    pub fn calls_per_agent_hour(&self) -> f64 {
        3600.0 / self.handle_time_secs
    }

    /// Calls one agent can take over a shift, after occupancy.
    pub fn calls_per_shift(&self) -> f64 {
        self.calls_per_agent_hour() * SHIFT_HOURS * self.occupancy
    }

    /// Headcount left after shrinkage. Fractional on purpose.
    pub fn effective_agents(&self, agents: u64) -> f64 {
        agents as f64 * (1.0 - self.shrinkage)
    }
}

/// Capacity inputs plus the target service level; used by the
/// forward (agents required) and calls-handled calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffingParams {
    capacity:      CapacityParams,
    service_level: f64,
}

impl StaffingParams {
    /// `service_level` is the target fraction in (0, 1].
    pub fn new(capacity: CapacityParams, service_level: f64) -> StaffingResult<Self> {
        if !service_level.is_finite() || service_level <= 0.0 || service_level > 1.0 {
            return Err(invalid("service_level", service_level, "must be in (0, 1]"));
        }
        Ok(Self { capacity, service_level })
    }

    /// Dashboard integers; service level 50–100%.
    pub fn from_percentages(
        handle_time_secs: u32,
        occupancy_pct: u32,
        shrinkage_pct: u32,
        service_level_pct: u32,
    ) -> StaffingResult<Self> {
        let capacity = CapacityParams::from_percentages(handle_time_secs, occupancy_pct, shrinkage_pct)?;
        if !(50..=100).contains(&service_level_pct) {
            return Err(invalid("service_level_pct", service_level_pct as f64, "must be between 50 and 100"));
        }
        Self::new(capacity, service_level_pct as f64 / 100.0)
    }

    pub fn capacity(&self) -> &CapacityParams { &self.capacity }
    pub fn service_level(&self) -> f64        { self.service_level }

    /// Headcount multiplier for the service-level shortfall: 1 + (1 - L).
    pub fn service_level_inflation(&self) -> f64 {
        1.0 + (1.0 - self.service_level)
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> StaffingError {
    StaffingError::InvalidParameter { name, value, reason }
}
