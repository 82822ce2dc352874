use crate::{
    error::{StaffingError, StaffingResult},
    params::{CapacityParams, StaffingParams},
    types::{AgentCount, CallVolume, HOURS_PER_DAY},
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Allowed drift from 1.0 in a normalized profile.
pub const PROFILE_SUM_EPSILON: f64 = 1e-9;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ── Built-in hourly profiles (Karachi contact centre) ──────────────
// Relative weights, hour 00 first. Normalized at load.

const MONDAY: [f64; HOURS_PER_DAY] = [
    0.004, 0.003, 0.002, 0.002, 0.002, 0.002,
    0.003, 0.005, 0.010, 0.020, 0.055, 0.065,
    0.075, 0.080, 0.080, 0.075, 0.060, 0.050,
    0.045, 0.040, 0.030, 0.020, 0.015, 0.010,
];

const TUESDAY: [f64; HOURS_PER_DAY] = [
    0.003, 0.002, 0.002, 0.002, 0.002, 0.003,
    0.004, 0.007, 0.012, 0.022, 0.060, 0.070,
    0.075, 0.080, 0.080, 0.070, 0.065, 0.055,
    0.045, 0.040, 0.030, 0.025, 0.015, 0.010,
];

const WEDNESDAY: [f64; HOURS_PER_DAY] = [
    0.005, 0.003, 0.002, 0.002, 0.002, 0.003,
    0.005, 0.008, 0.013, 0.025, 0.058, 0.068,
    0.075, 0.080, 0.078, 0.070, 0.065, 0.055,
    0.050, 0.040, 0.035, 0.025, 0.015, 0.010,
];

const THURSDAY: [f64; HOURS_PER_DAY] = [
    0.004, 0.003, 0.002, 0.002, 0.002, 0.003,
    0.005, 0.008, 0.016, 0.030, 0.060, 0.070,
    0.075, 0.080, 0.075, 0.070, 0.065, 0.055,
    0.050, 0.040, 0.035, 0.025, 0.015, 0.010,
];

// Friday prayers: dip at 13:00–14:00, kept shallow.
const FRIDAY: [f64; HOURS_PER_DAY] = [
    0.004, 0.003, 0.002, 0.002, 0.002, 0.003,
    0.005, 0.009, 0.016, 0.030, 0.060, 0.070,
    0.075, 0.030, 0.035, 0.045, 0.065, 0.055,
    0.050, 0.040, 0.035, 0.025, 0.015, 0.010,
];

const SATURDAY: [f64; HOURS_PER_DAY] = [
    0.006, 0.004, 0.003, 0.003, 0.003, 0.004,
    0.006, 0.010, 0.018, 0.040, 0.065, 0.070,
    0.075, 0.080, 0.075, 0.070, 0.060, 0.055,
    0.050, 0.045, 0.030, 0.020, 0.015, 0.010,
];

const SUNDAY: [f64; HOURS_PER_DAY] = [
    0.010, 0.007, 0.005, 0.004, 0.003, 0.003,
    0.005, 0.010, 0.020, 0.040, 0.060, 0.070,
    0.075, 0.080, 0.075, 0.070, 0.060, 0.055,
    0.050, 0.045, 0.035, 0.025, 0.015, 0.010,
];

/// Weekday → 24 hourly weights, each profile summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfiles {
    pub region: String,
    weights:    [[f64; HOURS_PER_DAY]; 7],
}

#[derive(Debug, Clone, Deserialize)]
struct HourlyProfilesFile {
    region:   String,
    profiles: WeekdayProfilesFile,
}

#[derive(Debug, Clone, Deserialize)]
struct WeekdayProfilesFile {
    monday:    Option<Vec<f64>>,
    tuesday:   Option<Vec<f64>>,
    wednesday: Option<Vec<f64>>,
    thursday:  Option<Vec<f64>>,
    friday:    Option<Vec<f64>>,
    saturday:  Option<Vec<f64>>,
    sunday:    Option<Vec<f64>>,
}

impl HourlyProfiles {
    /// The shipped tables, no I/O.
    pub fn builtin() -> Self {
        let raw = [MONDAY, TUESDAY, WEDNESDAY, THURSDAY, FRIDAY, SATURDAY, SUNDAY];
        let mut weights = [[0.0; HOURS_PER_DAY]; 7];
        for (slot, profile) in weights.iter_mut().zip(raw.iter()) {
            let total: f64 = profile.iter().sum();
            for (w, r) in slot.iter_mut().zip(profile.iter()) {
                *w = r / total;
            }
        }
        Self { region: "karachi".into(), weights }
    }

    /// Build from raw per-weekday weights, Monday first.
    /// Missing weekdays reuse Monday; Monday itself is required.
    pub fn from_weights(region: impl Into<String>, raw: [Option<Vec<f64>>; 7]) -> StaffingResult<Self> {
        let monday = match &raw[0] {
            Some(m) => normalize_profile(Weekday::Mon, m)?,
            None => {
                return Err(StaffingError::InvalidProfile {
                    weekday: "Mon".into(),
                    reason:  "Monday profile is required".into(),
                })
            }
        };

        let mut weights = [monday; 7];
        for (i, profile) in raw.iter().enumerate().skip(1) {
            match profile {
                Some(p) => weights[i] = normalize_profile(WEEKDAYS[i], p)?,
                None => log::warn!("config: no {} profile, using Monday's", WEEKDAYS[i]),
            }
        }

        Ok(Self { region: region.into(), weights })
    }

    pub fn from_json(content: &str) -> StaffingResult<Self> {
        let file: HourlyProfilesFile = serde_json::from_str(content)?;
        let p = file.profiles;
        Self::from_weights(
            file.region,
            [p.monday, p.tuesday, p.wednesday, p.thursday, p.friday, p.saturday, p.sunday],
        )
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &[f64; HOURS_PER_DAY] {
        &self.weights[weekday.num_days_from_monday() as usize]
    }

    /// 0 = Monday .. 6 = Sunday. Anything else gets Monday's profile.
    pub fn for_index(&self, day_of_week: u32) -> &[f64; HOURS_PER_DAY] {
        self.weights
            .get(day_of_week as usize)
            .unwrap_or(&self.weights[0])
    }
}

impl Default for HourlyProfiles {
    fn default() -> Self { Self::builtin() }
}

fn normalize_profile(weekday: Weekday, raw: &[f64]) -> StaffingResult<[f64; HOURS_PER_DAY]> {
    let fail = |reason: String| StaffingError::InvalidProfile {
        weekday: weekday.to_string(),
        reason,
    };

    if raw.len() != HOURS_PER_DAY {
        return Err(fail(format!("expected {HOURS_PER_DAY} hourly weights, got {}", raw.len())));
    }
    if let Some((hour, w)) = raw.iter().enumerate().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        return Err(fail(format!("hour {hour} has weight {w}")));
    }
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return Err(fail("weights sum to zero".into()));
    }

    let mut out = [0.0; HOURS_PER_DAY];
    for (o, w) in out.iter_mut().zip(raw) {
        *o = w / total;
    }

    let sum: f64 = out.iter().sum();
    if (sum - 1.0).abs() > PROFILE_SUM_EPSILON {
        return Err(fail(format!("normalized weights sum to {sum}")));
    }
    Ok(out)
}

/// Dashboard default inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingDefaults {
    pub handle_time_secs:  u32,
    pub occupancy_pct:     u32,
    pub shrinkage_pct:     u32,
    pub service_level_pct: u32,
    pub available_agents:  AgentCount,
    pub call_volume:       CallVolume,
    pub jitter:            f64,
}

impl Default for StaffingDefaults {
    fn default() -> Self {
        Self {
            handle_time_secs:  300,
            occupancy_pct:     85,
            shrinkage_pct:     20,
            service_level_pct: 90,
            available_agents:  50,
            call_volume:       1000,
            jitter:            crate::distribution::DEFAULT_JITTER,
        }
    }
}

impl StaffingDefaults {
    pub fn capacity(&self) -> StaffingResult<CapacityParams> {
        CapacityParams::from_percentages(self.handle_time_secs, self.occupancy_pct, self.shrinkage_pct)
    }

    pub fn params(&self) -> StaffingResult<StaffingParams> {
        StaffingParams::from_percentages(
            self.handle_time_secs,
            self.occupancy_pct,
            self.shrinkage_pct,
            self.service_level_pct,
        )
    }

    /// Every default must be usable as-is by the mode that reads it.
    pub fn validate(&self) -> StaffingResult<()> {
        self.params()?;
        if self.available_agents < 1 {
            return Err(StaffingError::InvalidParameter {
                name:   "available_agents",
                value:  self.available_agents as f64,
                reason: "must be at least 1",
            });
        }
        if self.call_volume < 1 {
            return Err(StaffingError::InvalidParameter {
                name:   "call_volume",
                value:  self.call_volume as f64,
                reason: "must be at least 1",
            });
        }
        if !self.jitter.is_finite() || !(0.0..1.0).contains(&self.jitter) {
            return Err(StaffingError::InvalidParameter {
                name:   "jitter",
                value:  self.jitter,
                reason: "must be in [0, 1)",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaffingConfig {
    pub defaults: StaffingDefaults,
    pub profiles: HourlyProfiles,
}

impl StaffingConfig {
    /// Load from the data/ directory.
    /// In tests, use StaffingConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let profiles_path = format!("{data_dir}/profiles/hourly_profiles.json");
        let profiles_content = std::fs::read_to_string(&profiles_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {profiles_path}: {e}"))?;
        let profiles = HourlyProfiles::from_json(&profiles_content)
            .map_err(|e| anyhow::anyhow!("{profiles_path}: {e}"))?;

        let defaults_path = format!("{data_dir}/staffing_defaults.json");
        let defaults_content = std::fs::read_to_string(&defaults_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {defaults_path}: {e}"))?;
        let defaults: StaffingDefaults = serde_json::from_str(&defaults_content)?;
        // Fail at load, not at the first recompute.
        defaults
            .validate()
            .map_err(|e| anyhow::anyhow!("{defaults_path}: {e}"))?;

        log::info!("config: loaded '{}' hourly profiles from {data_dir}", profiles.region);

        Ok(Self { defaults, profiles })
    }

    /// Built-in values for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            defaults: StaffingDefaults::default(),
            profiles: HourlyProfiles::builtin(),
        }
    }
}
