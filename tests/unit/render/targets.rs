use super::*;
use crate::capability::tier::CapabilityTier;

fn frame(phase: usize, progress: f64) -> FrameSample {
    FrameSample {
        phase,
        progress,
        global_time_secs: phase as f64 * 2.0 + progress,
        loop_iteration: 0,
    }
}

struct Counter(u64);

impl RandomSource for Counter {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1 << 62);
        self.0
    }
}

#[test]
fn every_target_ignores_unknown_phases() {
    let budget = CapabilityTier::Full.budget();
    for target in payment_flow_targets(1) {
        assert!(target.compose(&frame(7, 0.5), &budget).is_none());
        assert!(target.compose(&frame(usize::MAX, 0.0), &budget).is_none());
    }
}

#[test]
fn each_phase_has_at_least_one_target() {
    let budget = CapabilityTier::Full.budget();
    let targets = payment_flow_targets(1);
    for phase in 0..PaymentPhase::ALL.len() {
        let drawn = targets
            .iter()
            .filter_map(|t| t.compose(&frame(phase, 0.5), &budget))
            .count();
        assert!(drawn > 0, "phase {phase} draws nothing");
    }
}

#[test]
fn card_fades_in() {
    let budget = CapabilityTier::Full.budget();
    let start = CardTarget.compose(&frame(0, 0.0), &budget).unwrap();
    let end = CardTarget.compose(&frame(0, 1.0), &budget).unwrap();
    assert!(start.opacity.abs() < 1e-12);
    assert!((end.opacity - 1.0).abs() < 1e-12);
}

#[test]
fn particle_count_follows_budget() {
    let target = ParticleTarget::new(9);
    for tier in [CapabilityTier::Full, CapabilityTier::Reduced] {
        let budget = tier.budget();
        let state = target.compose(&frame(3, 0.5), &budget).unwrap();
        assert_eq!(state.elements.len(), budget.particle_count as usize);
    }
}

#[test]
fn particles_are_reproducible_per_seed() {
    let budget = CapabilityTier::Full.budget();
    let a = ParticleTarget::new(5).compose(&frame(3, 0.3), &budget);
    let b = ParticleTarget::new(5).compose(&frame(3, 0.3), &budget);
    let c = ParticleTarget::new(6).compose(&frame(3, 0.3), &budget);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn particles_finish_on_their_route() {
    let budget = CapabilityTier::Full.budget();
    let state = ParticleTarget::new(3).compose(&frame(3, 1.0), &budget).unwrap();
    for el in state.elements {
        let VisualElement::Particle { position, route, .. } = el else {
            panic!("unexpected element");
        };
        let end = route_curve(route, budget.route_count as usize).p2;
        assert!((position - end).hypot() < 1e-9);
    }
}

#[test]
fn plan_routes_uses_injected_source() {
    let plan = plan_routes(&mut Counter(0), 4, 4);
    assert_eq!(plan, vec![1, 2, 3, 0]);
    assert!(plan_routes(&mut Counter(0), 4, 0).is_empty());
}

#[test]
fn routing_highlights_exactly_one_route() {
    let budget = CapabilityTier::Full.budget();
    let state = RoutingTarget::new(11).compose(&frame(3, 0.5), &budget).unwrap();
    let highlighted = state
        .elements
        .iter()
        .filter(|e| matches!(e, VisualElement::Route { highlighted: true, .. }))
        .count();
    assert_eq!(highlighted, 1);
    assert_eq!(state.elements.len(), budget.route_count as usize);
}

#[test]
fn network_activates_progressively() {
    let budget = CapabilityTier::Full.budget();
    let active = |progress: f64| {
        ProcessingTarget
            .compose(&frame(4, progress), &budget)
            .unwrap()
            .elements
            .iter()
            .filter(|e| matches!(e, VisualElement::Node { active: true, .. }))
            .count()
    };
    assert_eq!(active(0.0), 0);
    assert!(active(0.5) > 0);
    assert_eq!(active(1.0), budget.network_nodes as usize);

    let settled = ProcessingTarget.compose(&frame(6, 1.0), &budget).unwrap();
    assert!(settled.opacity.abs() < 1e-12);
}

#[test]
fn busiest_route_breaks_ties_low() {
    assert_eq!(busiest_route(&[1, 0], 2), Some(0));
    assert_eq!(busiest_route(&[1, 1, 0], 2), Some(1));
    assert_eq!(busiest_route(&[], 0), None);
}
