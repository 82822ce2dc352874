//! Staffing formula tests: worked examples and the ordering/clamping
//! guarantees every caller relies on.

use staffing_core::{
    formulas::{calculate_agents, calculate_calls_by_agents, calculate_service_level, AgentRequirement},
    params::{CapacityParams, StaffingParams},
};

fn standard_params() -> StaffingParams {
    StaffingParams::from_percentages(300, 85, 20, 90).unwrap()
}

/// T=300s, O=85%, S=20%, L=90%, V=1000 → 16 agents, 20 with shrinkage.
#[test]
fn agents_required_worked_example() {
    let req = calculate_agents(1000, &standard_params());
    assert_eq!(
        req,
        AgentRequirement { without_shrinkage: 16, with_shrinkage: 20 },
        "ceil(1000 / 71.4 × 1.10) = 16, ceil(16 × 1.20) = 20"
    );
}

/// 50 agents, same parameters → 40 effective, 2856 raw capacity, 2596 calls.
#[test]
fn calls_handled_worked_example() {
    assert_eq!(calculate_calls_by_agents(50, &standard_params()), 2596);
}

#[test]
fn larger_volumes_scale_up() {
    let p = standard_params();
    let cases = [(500, 8, 10), (2500, 39, 47), (12000, 185, 222)];
    for (volume, base, with) in cases {
        let req = calculate_agents(volume, &p);
        assert_eq!(req.without_shrinkage, base, "base agents for {volume} calls");
        assert_eq!(req.with_shrinkage, with, "shrinkage agents for {volume} calls");
    }
}

#[test]
fn shrinkage_never_reduces_headcount() {
    for aht in [30, 180, 300, 600, 1200] {
        for occ in [50, 70, 85, 100] {
            for shr in [0, 10, 35, 60, 99] {
                for sl in [50, 80, 90, 100] {
                    let p = StaffingParams::from_percentages(aht, occ, shr, sl).unwrap();
                    for volume in [0, 1, 17, 999, 25_000] {
                        let req = calculate_agents(volume, &p);
                        assert!(
                            req.with_shrinkage >= req.without_shrinkage,
                            "aht={aht} occ={occ} shr={shr} sl={sl} v={volume}: {req:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn zero_shrinkage_leaves_headcount_unchanged() {
    let p = StaffingParams::from_percentages(300, 85, 0, 90).unwrap();
    let req = calculate_agents(1000, &p);
    assert_eq!(req.without_shrinkage, req.with_shrinkage);
}

#[test]
fn higher_service_target_needs_fewer_agents_under_this_heuristic() {
    // The 1 + (1 - L) factor shrinks as L rises; a full target adds nothing.
    let full = StaffingParams::from_percentages(300, 85, 20, 100).unwrap();
    let low = StaffingParams::from_percentages(300, 85, 20, 50).unwrap();
    let v = 5000;
    assert!(calculate_agents(v, &low).without_shrinkage > calculate_agents(v, &full).without_shrinkage);
}

#[test]
fn service_level_is_clamped_to_one() {
    let cap = CapacityParams::from_percentages(300, 85, 20).unwrap();
    for agents in [1, 50, 1_000, 1_000_000] {
        let sl = calculate_service_level(1000, &cap, agents);
        assert!((0.0..=1.0).contains(&sl), "{agents} agents gave {sl}");
    }
    assert_eq!(calculate_service_level(1000, &cap, 50), 1.0);
}

#[test]
fn service_level_partial_coverage() {
    let cap = CapacityParams::from_percentages(300, 85, 20).unwrap();
    // 10 agents × 0.8 × 71.4 = 571.2 calls against 2000.
    let sl = calculate_service_level(2000, &cap, 10);
    assert!((sl - 0.2856).abs() < 1e-9, "got {sl}");
}

#[test]
fn service_level_with_no_calls_is_full() {
    let cap = CapacityParams::from_percentages(300, 85, 20).unwrap();
    assert_eq!(calculate_service_level(0, &cap, 1), 1.0);
}

/// Feeding the forward result back in recovers at least the original
/// volume, less the shrinkage round-trip loss and one call of truncation.
#[test]
fn forward_then_inverse_covers_the_volume() {
    for shr in [0, 20, 45] {
        let p = StaffingParams::from_percentages(240, 80, shr, 85).unwrap();
        let s = p.capacity().shrinkage();
        for volume in [1, 10, 99, 1000, 4321, 80_000] {
            let agents = calculate_agents(volume, &p).with_shrinkage;
            let handled = calculate_calls_by_agents(agents, &p);
            assert!(
                (handled + 1) as f64 >= volume as f64 * (1.0 - s * s),
                "shr={shr} v={volume}: {agents} agents handle only {handled}"
            );
        }
    }
}

#[test]
fn calls_handled_grows_with_agents() {
    let p = standard_params();
    let mut last = 0;
    for agents in 1..200 {
        let calls = calculate_calls_by_agents(agents, &p);
        assert!(calls >= last, "{agents} agents handle {calls} < {last}");
        last = calls;
    }
}
