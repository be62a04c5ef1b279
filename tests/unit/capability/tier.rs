use super::*;

fn signals(reduced_motion: bool, mobile: bool, low_end: bool) -> CapabilitySignals {
    CapabilitySignals {
        reduced_motion,
        mobile,
        low_end,
    }
}

#[test]
fn decision_table() {
    for mobile in [false, true] {
        for low_end in [false, true] {
            assert_eq!(
                decide_tier(signals(true, mobile, low_end)),
                CapabilityTier::Static
            );
        }
    }
    assert_eq!(decide_tier(signals(false, true, false)), CapabilityTier::Reduced);
    assert_eq!(decide_tier(signals(false, true, true)), CapabilityTier::Reduced);
    assert_eq!(decide_tier(signals(false, false, true)), CapabilityTier::Reduced);
    assert_eq!(decide_tier(signals(false, false, false)), CapabilityTier::Full);
}

#[test]
fn budgets_shrink_with_tier() {
    let full = CapabilityTier::Full.budget();
    let reduced = CapabilityTier::Reduced.budget();
    let stat = CapabilityTier::Static.budget();
    assert!(full.particle_count > reduced.particle_count);
    assert!(reduced.particle_count > stat.particle_count);
    assert_eq!(full.min_frame_interval_secs(), None);
    assert!((reduced.min_frame_interval_secs().unwrap() - 1.0 / 30.0).abs() < 1e-12);
    assert!(!CapabilityTier::Static.animates());
    assert!(CapabilityTier::Reduced.animates());
}

#[test]
fn tiers_order_by_fidelity() {
    assert!(CapabilityTier::Static < CapabilityTier::Reduced);
    assert!(CapabilityTier::Reduced < CapabilityTier::Full);
}
