pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output of one orchestrator tick, handed to every render target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSample {
    /// Index into the timeline's phase list.
    pub phase: usize,
    /// Intra-phase progress in `[0, 1]`.
    pub progress: f64,
    /// Effective (speed-scaled) elapsed seconds since the loop started.
    pub global_time_secs: f64,
    /// Completed loop iterations, `floor(global_time / loop_duration)`.
    pub loop_iteration: u64,
}

impl FrameSample {
    /// First frame of the first loop.
    pub fn origin() -> Self {
        Self {
            phase: 0,
            progress: 0.0,
            global_time_secs: 0.0,
            loop_iteration: 0,
        }
    }
}

/// Clamp into `[0, 1]`, mapping NaN and infinities to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// `v` when finite, otherwise `fallback`.
pub fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
