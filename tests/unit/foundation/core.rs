use super::*;

#[test]
fn clamp01_rejects_non_finite() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(f64::INFINITY), 0.0);
    assert_eq!(clamp01(f64::NEG_INFINITY), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(3.0), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn finite_or_falls_back() {
    assert_eq!(finite_or(f64::NAN, 2.0), 2.0);
    assert_eq!(finite_or(1.5, 2.0), 1.5);
}

#[test]
fn origin_sample_is_phase_zero() {
    let s = FrameSample::origin();
    assert_eq!(s.phase, 0);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.loop_iteration, 0);
}
