//! Hourly distribution — splits a daily call total into 24 buckets.
//!
//! Each hour's weight is jittered, the weights are renormalized, then
//! scaled to the daily total and rounded per bucket. Rounding is per
//! bucket, so the buckets only approximately sum to the total.

use crate::{
    config::HourlyProfiles,
    error::{StaffingError, StaffingResult},
    forecast::ForecastTable,
    rng::JitterRng,
    types::{CallVolume, HOURS_PER_DAY},
};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// ±5% per hour.
pub const DEFAULT_JITTER: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDistribution {
    pub date:        NaiveDate,
    pub weekday:     Weekday,
    pub daily_total: CallVolume,
    pub calls:       [CallVolume; HOURS_PER_DAY],
}

impl HourlyDistribution {
    /// Sum of the buckets; may differ from `daily_total` by rounding.
    pub fn total(&self) -> CallVolume {
        self.calls.iter().fold(0, |acc, c| acc.saturating_add(*c))
    }

    /// Busiest hour (earliest on ties) and its call count.
    pub fn peak_hour(&self) -> (usize, CallVolume) {
        self.calls
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0), |best, (hour, calls)| if calls > best.1 { (hour, calls) } else { best })
    }
}

/// Split `total_calls` over the hours of `day_of_week` (0 = Monday).
/// Unknown weekday indices use the Monday profile.
pub fn generate_hourly_distribution(
    total_calls: CallVolume,
    day_of_week: u32,
    jitter: f64,
    profiles: &HourlyProfiles,
    rng: &mut JitterRng,
) -> StaffingResult<[CallVolume; HOURS_PER_DAY]> {
    if !jitter.is_finite() || !(0.0..1.0).contains(&jitter) {
        return Err(StaffingError::InvalidParameter {
            name:   "jitter",
            value:  jitter,
            reason: "must be in [0, 1)",
        });
    }

    let profile = profiles.for_index(day_of_week);

    let mut weights = [0.0; HOURS_PER_DAY];
    for (w, base) in weights.iter_mut().zip(profile) {
        *w = base * rng.factor(jitter);
    }
    let weight_sum: f64 = weights.iter().sum();

    let mut calls = [0; HOURS_PER_DAY];
    for (c, w) in calls.iter_mut().zip(weights) {
        *c = (w / weight_sum * total_calls as f64).round_ties_even() as CallVolume;
    }

    log::debug!(
        "distribution: day={day_of_week} total={total_calls} split_sum={}",
        calls.iter().fold(0 as CallVolume, |acc, c| acc.saturating_add(*c))
    );

    Ok(calls)
}

/// Look up the forecast for `date` and split it by hour. The weekday
/// comes from the date itself, not the file's `Day` label.
pub fn daily_hourly_distribution(
    forecast: &ForecastTable,
    date: NaiveDate,
    jitter: f64,
    profiles: &HourlyProfiles,
    rng: &mut JitterRng,
) -> StaffingResult<HourlyDistribution> {
    let daily_total = forecast.volume_on(date)?;
    let weekday = date.weekday();
    let calls = generate_hourly_distribution(
        daily_total,
        weekday.num_days_from_monday(),
        jitter,
        profiles,
        rng,
    )?;

    Ok(HourlyDistribution { date, weekday, daily_total, calls })
}
