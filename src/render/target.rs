use crate::{
    capability::tier::RenderBudget,
    foundation::core::{Affine, FrameSample, Point},
};

/// One drawable primitive, in unit canvas space (`[0, 1]` on both axes).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualElement {
    Card {
        lift: f64,
        glow: f64,
    },
    Particle {
        position: Point,
        radius: f64,
        route: usize,
    },
    Route {
        route: usize,
        drawn: f64, // fraction of the path stroked, [0, 1]
        highlighted: bool,
    },
    Node {
        position: Point,
        pulse: f64,
        active: bool,
    },
}

/// What one target wants drawn for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualState {
    pub target: &'static str,
    pub phase: usize,
    pub opacity: f64,
    pub transform: Affine,
    pub elements: Vec<VisualElement>,
}

/// A leaf consumer of the orchestrator's per-frame sample.
///
/// `compose` takes `&self`, so a target cannot mutate orchestrator state or carry hidden
/// per-frame state of its own. Phases a target does not draw return `None`, including indices
/// beyond the timeline it was written for.
pub trait RenderTarget {
    fn name(&self) -> &'static str;

    fn compose(&self, frame: &FrameSample, budget: &RenderBudget) -> Option<VisualState>;
}
