use super::*;
use crate::{
    capability::{provider::CapabilityProvider, tier::CapabilityTier},
    gate::visibility::{ObserverSupport, VisibilityGate},
    runtime::{scheduler::ManualScheduler, scroll::ScrollReader},
};

fn looped(
    tier: CapabilityTier,
    gate: VisibilityGate,
) -> (AnimationLoop<ManualScheduler>, ManualScheduler) {
    let o = Orchestrator::payment_flow(
        CapabilityProvider::fixed(tier),
        ScrollReader::detached(0.0),
        3,
    )
    .unwrap()
    .with_gate(gate);
    let sched = ManualScheduler::new();
    (AnimationLoop::new(o, sched.clone()), sched)
}

#[test]
fn mount_requests_one_frame_and_rearms() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::always_open());
    assert!(!l.is_scheduled());
    l.mount();
    assert_eq!(sched.pending_count(), 1);

    for i in 0..5 {
        let id = sched.pop_due().unwrap();
        assert!(matches!(l.on_frame(id, f64::from(i) / 60.0), TickOutcome::Rendered(_)));
        assert_eq!(sched.pending_count(), 1);
    }
    assert_eq!(sched.requested_count(), 6);
}

#[test]
fn static_tier_never_schedules() {
    let (mut l, sched) = looped(CapabilityTier::Static, VisibilityGate::always_open());
    l.mount();
    assert!(!l.is_scheduled());
    assert_eq!(sched.requested_count(), 0);
}

#[test]
fn closed_gate_cancels_and_reopen_rearms() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::new(ObserverSupport::all()));
    l.mount();
    assert!(!l.is_scheduled(), "viewport starts hidden");

    l.set_viewport_visible(true);
    assert!(l.is_scheduled());
    l.set_tab_visible(false);
    assert!(!l.is_scheduled());
    assert_eq!(sched.cancelled_count(), 1);
    assert_eq!(sched.pending_count(), 0);

    l.set_tab_visible(true);
    assert!(l.is_scheduled());
}

#[test]
fn reduced_motion_stops_within_one_cycle() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::always_open());
    l.mount();
    let id = sched.pop_due().unwrap();
    l.on_frame(id, 0.0);
    assert!(l.is_scheduled());

    let change = l.set_reduced_motion(true).unwrap();
    assert!(change.stops_loop());
    assert!(!l.is_scheduled());
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn stale_callbacks_are_ignored() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::always_open());
    l.mount();
    let id = sched.pop_due().unwrap();
    assert!(matches!(l.on_frame(id, 0.0), TickOutcome::Rendered(_)));
    assert_eq!(l.on_frame(id, 0.1), TickOutcome::Stale);
    assert_eq!(l.orchestrator().state().frames_rendered, 1);
}

#[test]
fn drop_cancels_pending_request() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::always_open());
    l.mount();
    assert_eq!(sched.pending_count(), 1);
    drop(l);
    assert_eq!(sched.pending_count(), 0);
    assert_eq!(sched.cancelled_count(), 1);
}

#[test]
fn unmount_cancels_and_blocks_rearm() {
    let (mut l, sched) = looped(CapabilityTier::Full, VisibilityGate::always_open());
    l.mount();
    l.unmount();
    assert!(!l.is_mounted());
    assert_eq!(sched.pending_count(), 0);
    l.set_tab_visible(true);
    assert!(!l.is_scheduled());
}

#[test]
fn viewport_rects_open_and_close_the_gate() {
    let gate = VisibilityGate::new(ObserverSupport::all());
    let (mut l, sched) = looped(CapabilityTier::Full, gate);
    l.mount();
    let observer = ViewportObserver::default();
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);

    let t = l.observe_viewport(&observer, Rect::new(0.0, 860.0, 1280.0, 1200.0), viewport);
    assert_eq!(t, GateTransition::Opened);
    assert!(l.is_scheduled());

    let t = l.observe_viewport(&observer, Rect::new(0.0, 3000.0, 1280.0, 3400.0), viewport);
    assert_eq!(t, GateTransition::Closed);
    assert!(!l.is_scheduled());
    assert_eq!(sched.cancelled_count(), 1);
}
