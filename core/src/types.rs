//! Shared primitive types used across the staffing model.

/// A number of calls: daily forecast, hourly bucket, or shift capacity.
pub type CallVolume = u64;

/// A headcount of agents.
pub type AgentCount = u64;

/// Every hourly distribution has exactly this many buckets.
pub const HOURS_PER_DAY: usize = 24;

/// Calendar grids are Monday..Sunday.
pub const DAYS_PER_WEEK: usize = 7;
