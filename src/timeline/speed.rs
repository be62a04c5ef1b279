use crate::foundation::{
    core::clamp01,
    error::{MotionError, MotionResult},
};

/// Maps the host's scroll depth to a playback speed multiplier.
///
/// `m = base + clamp01(scroll) * range`, then clamped to `[min, max]`. The multiplier scales the
/// rate at which elapsed time accumulates, never the timestamp itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpeedModulation {
    pub base: f64,
    pub range: f64, // >= 0 keeps the mapping non-decreasing
    pub min: f64,
    pub max: f64,
}

impl SpeedModulation {
    /// Hero-section tuning: `[0.8, 1.3]`.
    pub fn urgent() -> Self {
        Self {
            base: 0.8,
            range: 0.5,
            min: 0.8,
            max: 1.3,
        }
    }

    /// Softer tuning used further down the page: `[0.6, 1.0]`.
    pub fn gentle() -> Self {
        Self {
            base: 0.6,
            range: 0.4,
            min: 0.6,
            max: 1.0,
        }
    }

    /// Constant speed, ignoring scroll.
    pub fn fixed(multiplier: f64) -> Self {
        Self {
            base: multiplier,
            range: 0.0,
            min: multiplier,
            max: multiplier,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let all_finite = [self.base, self.range, self.min, self.max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(MotionError::validation("speed parameters must be finite"));
        }
        if self.range < 0.0 {
            return Err(MotionError::validation("speed range must be >= 0"));
        }
        if self.min <= 0.0 {
            return Err(MotionError::validation("speed min must be > 0"));
        }
        if self.min > self.max {
            return Err(MotionError::validation("speed min must be <= max"));
        }
        Ok(())
    }

    /// Speed multiplier for a raw scroll value. Out-of-range and non-finite input is clamped.
    pub fn multiplier(&self, scroll: f64) -> f64 {
        let m = self.base + clamp01(scroll) * self.range;
        if m.is_finite() {
            m.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

impl Default for SpeedModulation {
    fn default() -> Self {
        Self::urgent()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/speed.rs"]
mod tests;
