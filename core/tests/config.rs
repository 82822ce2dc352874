//! Configuration loading tests.

use chrono::Weekday;
use staffing_core::config::{HourlyProfiles, StaffingConfig, PROFILE_SUM_EPSILON};
use std::fs;
use tempfile::TempDir;

const DEFAULTS: &str = r#"{
  "handle_time_secs": 240,
  "occupancy_pct": 80,
  "shrinkage_pct": 25,
  "service_level_pct": 85,
  "available_agents": 40,
  "call_volume": 1500,
  "jitter": 0.03
}"#;

fn flat_profile(value: f64) -> String {
    let weights: Vec<String> = (0..24).map(|_| value.to_string()).collect();
    format!("[{}]", weights.join(", "))
}

fn write_data_dir(profiles: &str, defaults: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("profiles")).unwrap();
    fs::write(dir.path().join("profiles/hourly_profiles.json"), profiles).unwrap();
    fs::write(dir.path().join("staffing_defaults.json"), defaults).unwrap();
    dir
}

#[test]
fn loads_shipped_data_directory() {
    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
    let config = StaffingConfig::load(data_dir).unwrap();
    assert_eq!(config.profiles, HourlyProfiles::builtin());
    assert_eq!(config.defaults.handle_time_secs, 300);
    assert_eq!(config.defaults.service_level_pct, 90);
}

#[test]
fn partial_profiles_fall_back_to_monday() {
    let profiles = format!(
        r#"{{"region": "test", "profiles": {{"monday": {}, "friday": {}}}}}"#,
        flat_profile(2.0),
        flat_profile(0.5)
    );
    let dir = write_data_dir(&profiles, DEFAULTS);
    let config = StaffingConfig::load(&dir.path().to_string_lossy()).unwrap();

    assert_eq!(config.profiles.region, "test");
    assert_eq!(config.profiles.for_weekday(Weekday::Sun), config.profiles.for_weekday(Weekday::Mon));
    let sum: f64 = config.profiles.for_weekday(Weekday::Fri).iter().sum();
    assert!((sum - 1.0).abs() < PROFILE_SUM_EPSILON);
    assert_eq!(config.defaults.available_agents, 40);
    assert!((config.defaults.jitter - 0.03).abs() < 1e-12);
}

#[test]
fn monday_profile_is_required() {
    let profiles = format!(r#"{{"region": "x", "profiles": {{"tuesday": {}}}}}"#, flat_profile(1.0));
    assert!(HourlyProfiles::from_json(&profiles).is_err());
}

#[test]
fn wrong_length_profile_fails_at_load() {
    let profiles = r#"{"region": "x", "profiles": {"monday": [0.5, 0.5]}}"#;
    let dir = write_data_dir(profiles, DEFAULTS);
    let err = StaffingConfig::load(&dir.path().to_string_lossy()).unwrap_err();
    assert!(err.to_string().contains("expected 24"), "{err}");
}

#[test]
fn out_of_range_defaults_fail_at_load() {
    let profiles = format!(r#"{{"region": "x", "profiles": {{"monday": {}}}}}"#, flat_profile(1.0));
    let bad = DEFAULTS.replace("\"occupancy_pct\": 80", "\"occupancy_pct\": 30");
    let dir = write_data_dir(&profiles, &bad);
    assert!(StaffingConfig::load(&dir.path().to_string_lossy()).is_err());
}

#[test]
fn missing_files_name_the_path() {
    let dir = TempDir::new().unwrap();
    let err = StaffingConfig::load(&dir.path().to_string_lossy()).unwrap_err();
    assert!(err.to_string().contains("hourly_profiles.json"), "{err}");
}

#[test]
fn unusable_defaults_fail_at_load() {
    let profiles = format!(r#"{{"region": "x", "profiles": {{"monday": {}}}}}"#, flat_profile(1.0));
    let cases = [
        ("\"available_agents\": 40", "\"available_agents\": 0", "available_agents"),
        ("\"call_volume\": 1500", "\"call_volume\": 0", "call_volume"),
        ("\"jitter\": 0.03", "\"jitter\": 2.5", "jitter"),
    ];
    for (from, to, field) in cases {
        let bad = DEFAULTS.replace(from, to);
        assert_ne!(bad, DEFAULTS, "replacement for {field} did not apply");
        let dir = write_data_dir(&profiles, &bad);
        let err = StaffingConfig::load(&dir.path().to_string_lossy()).unwrap_err();
        assert!(err.to_string().contains(field), "{field}: {err}");
    }
}
