//! Call-centre staffing model.
//!
//! Daily call forecasts go in; agent requirements, achievable service
//! levels, hourly call splits and month calendars come out. Every
//! computation is a pure function of its inputs plus, for hourly
//! jitter, an explicit `JitterRng`.

pub mod calendar;
pub mod config;
pub mod distribution;
pub mod error;
pub mod forecast;
pub mod formulas;
pub mod params;
pub mod report;
pub mod rng;
pub mod types;

pub use error::{StaffingError, StaffingResult};
