use std::f64::consts::TAU;

use kurbo::{ParamCurve as _, QuadBez};

use crate::{
    capability::tier::RenderBudget,
    foundation::{
        core::{Affine, FrameSample, Point, Vec2, lerp},
        rng::{RandomSource, Rng64},
    },
    render::{
        ease::Ease,
        target::{RenderTarget, VisualElement, VisualState},
    },
    timeline::config::PaymentPhase,
};

const ORIGIN: Point = Point::new(0.18, 0.5);
const ACQUIRER_X: f64 = 0.82;
const NETWORK_CENTER: Point = Point::new(0.65, 0.5);
const NETWORK_RADIUS: f64 = 0.15;

/// Curve from the tokenized card to acquirer `k` of `n`.
pub fn route_curve(k: usize, n: usize) -> QuadBez {
    let n = n.max(1) as f64;
    let y = 0.2 + 0.6 * (k as f64 + 0.5) / n;
    QuadBez::new(ORIGIN, Point::new(0.5, y), Point::new(ACQUIRER_X, y))
}

/// Assign each particle a route. Visual variety only; reproducible for a given `rng` state.
pub fn plan_routes(rng: &mut impl RandomSource, particles: u32, routes: u32) -> Vec<usize> {
    if routes == 0 {
        return Vec::new();
    }
    (0..particles)
        .map(|_| rng.next_index(routes as usize))
        .collect()
}

/// Route plan for one loop iteration. Every target reading it sees the same plan.
fn loop_plan(seed: u64, frame: &FrameSample, budget: &RenderBudget) -> Vec<usize> {
    let mut rng = Rng64::fork(seed, frame.loop_iteration);
    plan_routes(&mut rng, budget.particle_count, budget.route_count)
}

fn busiest_route(plan: &[usize], routes: usize) -> Option<usize> {
    if routes == 0 {
        return None;
    }
    let mut counts = vec![0usize; routes];
    for &r in plan {
        counts[r] += 1;
    }
    // Ties resolve to the lowest index.
    (0..routes).rev().max_by_key(|&r| counts[r])
}

/// Card slides in during `Card` and tilts away during `Extraction`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardTarget;

impl RenderTarget for CardTarget {
    fn name(&self) -> &'static str {
        "card"
    }

    fn compose(&self, frame: &FrameSample, _budget: &RenderBudget) -> Option<VisualState> {
        let (opacity, scale, rotation, lift) = match PaymentPhase::from_index(frame.phase)? {
            PaymentPhase::Card => {
                let t = frame.progress;
                (
                    Ease::OutCubic.apply(t),
                    lerp(0.9, 1.0, Ease::OutBack.apply(t)),
                    0.0,
                    Ease::OutQuad.window(t, 0.5, 1.0),
                )
            }
            PaymentPhase::Extraction => {
                let t = Ease::InOutCubic.apply(frame.progress);
                (lerp(1.0, 0.4, t), 1.0, 0.12 * t, 1.0)
            }
            _ => return None,
        };

        let glow = 0.5 + 0.5 * (TAU * frame.global_time_secs * 0.5).sin();
        let transform = Affine::translate(ORIGIN.to_vec2())
            * Affine::rotate(rotation)
            * Affine::scale(scale);
        Some(VisualState {
            target: self.name(),
            phase: frame.phase,
            opacity,
            transform,
            elements: vec![VisualElement::Card { lift, glow }],
        })
    }
}

/// Particles burst out of the card during `Tokenization` and ride their routes during `Routing`.
#[derive(Clone, Copy, Debug)]
pub struct ParticleTarget {
    seed: u64,
}

impl ParticleTarget {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RenderTarget for ParticleTarget {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn compose(&self, frame: &FrameSample, budget: &RenderBudget) -> Option<VisualState> {
        let phase = PaymentPhase::from_index(frame.phase)?;
        if !matches!(phase, PaymentPhase::Tokenization | PaymentPhase::Routing) {
            return None;
        }

        let plan = loop_plan(self.seed, frame, budget);
        let n = plan.len().max(1) as f64;
        let routes = budget.route_count as usize;
        let elements = plan
            .iter()
            .enumerate()
            .map(|(i, &route)| {
                let i_f = i as f64;
                let position = match phase {
                    PaymentPhase::Tokenization => {
                        let mut jitter = Rng64::fork(self.seed ^ frame.loop_iteration, i as u64);
                        let angle = jitter.next_f64_01() * TAU;
                        let reach = 0.06 * Ease::OutCubic.apply(frame.progress);
                        ORIGIN + Vec2::new(angle.cos(), angle.sin()) * reach
                    }
                    _ => {
                        let stagger = 0.4 * i_f / n;
                        let t = Ease::InOutQuad.window(frame.progress, stagger, stagger + 0.6);
                        route_curve(route, routes).eval(t)
                    }
                };
                VisualElement::Particle {
                    position,
                    radius: 0.004 + 0.002 * ((i % 3) as f64),
                    route,
                }
            })
            .collect();

        Some(VisualState {
            target: self.name(),
            phase: frame.phase,
            opacity: 1.0,
            transform: Affine::IDENTITY,
            elements,
        })
    }
}

/// Route strokes draw on during `Routing` and stay lit through `Processing`.
#[derive(Clone, Copy, Debug)]
pub struct RoutingTarget {
    seed: u64,
}

impl RoutingTarget {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RenderTarget for RoutingTarget {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn compose(&self, frame: &FrameSample, budget: &RenderBudget) -> Option<VisualState> {
        let (drawn, opacity) = match PaymentPhase::from_index(frame.phase)? {
            PaymentPhase::Routing => (Ease::OutCubic.apply(frame.progress), 1.0),
            PaymentPhase::Processing => (1.0, lerp(1.0, 0.5, frame.progress)),
            _ => return None,
        };

        let routes = budget.route_count as usize;
        let plan = loop_plan(self.seed, frame, budget);
        let busiest = busiest_route(&plan, routes);
        let elements = (0..routes)
            .map(|route| VisualElement::Route {
                route,
                drawn,
                highlighted: Some(route) == busiest,
            })
            .collect();

        Some(VisualState {
            target: self.name(),
            phase: frame.phase,
            opacity,
            transform: Affine::IDENTITY,
            elements,
        })
    }
}

/// Processor network lights up during `Processing`, holds through `Approval` and fades out
/// during `Settlement`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessingTarget;

impl RenderTarget for ProcessingTarget {
    fn name(&self) -> &'static str {
        "network"
    }

    fn compose(&self, frame: &FrameSample, budget: &RenderBudget) -> Option<VisualState> {
        let n = budget.network_nodes as usize;
        let (active_count, opacity) = match PaymentPhase::from_index(frame.phase)? {
            PaymentPhase::Processing => ((frame.progress * n as f64).ceil() as usize, 1.0),
            PaymentPhase::Approval => (n, 1.0),
            PaymentPhase::Settlement => (n, 1.0 - Ease::OutQuad.apply(frame.progress)),
            _ => return None,
        };

        let elements = (0..n)
            .map(|k| {
                let frac = k as f64 / n as f64;
                let angle = TAU * frac;
                VisualElement::Node {
                    position: NETWORK_CENTER + Vec2::new(angle.cos(), angle.sin()) * NETWORK_RADIUS,
                    pulse: 0.5 + 0.5 * (TAU * (frame.global_time_secs * 1.5 + frac)).sin(),
                    active: k < active_count,
                }
            })
            .collect();

        Some(VisualState {
            target: self.name(),
            phase: frame.phase,
            opacity,
            transform: Affine::IDENTITY,
            elements,
        })
    }
}

/// The four targets of the payment-flow visual, sharing one route seed.
pub fn payment_flow_targets(seed: u64) -> Vec<Box<dyn RenderTarget>> {
    vec![
        Box::new(CardTarget),
        Box::new(ParticleTarget::new(seed)),
        Box::new(RoutingTarget::new(seed)),
        Box::new(ProcessingTarget),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/targets.rs"]
mod tests;
