use crate::{
    foundation::error::MotionResult,
    timeline::config::TimelineConfig,
};

/// Discrete phase plus intra-phase progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhasePosition {
    pub phase: usize,
    pub progress: f64, // [0, 1]
}

/// Pure mapping from elapsed seconds to a [`PhasePosition`], looping every `loop_duration_secs`.
#[derive(Clone, Debug)]
pub struct PhaseClock {
    loop_duration_secs: f64,
    starts: Vec<f64>,
    durations: Vec<f64>,
    // Last phase with a positive duration; target of the overshoot fallback.
    fallback_phase: usize,
    // Cycle times within this distance of a boundary snap to the next phase.
    boundary_eps: f64,
}

impl PhaseClock {
    /// Precompute phase boundaries. Fails only if `config` is invalid.
    pub fn new(config: &TimelineConfig) -> MotionResult<Self> {
        config.validate()?;

        let d = config.loop_duration_secs;
        let mut starts = Vec::with_capacity(config.phases.len());
        let mut durations = Vec::with_capacity(config.phases.len());
        let mut acc = 0.0;
        for p in &config.phases {
            starts.push(acc);
            let dur = p.weight * d;
            durations.push(dur);
            acc += dur;
        }
        let fallback_phase = durations.iter().rposition(|&dur| dur > 0.0).unwrap_or(0);

        Ok(Self {
            loop_duration_secs: d,
            starts,
            durations,
            fallback_phase,
            boundary_eps: d * 1e-12,
        })
    }

    pub fn loop_duration_secs(&self) -> f64 {
        self.loop_duration_secs
    }

    pub fn phase_count(&self) -> usize {
        self.durations.len()
    }

    /// Elapsed time reduced into `[0, loop_duration)`. Negative and non-finite input maps to `0`.
    pub fn cycle_time(&self, elapsed_secs: f64) -> f64 {
        self.split(elapsed_secs).1
    }

    /// Completed loop iterations at `elapsed_secs`. Always agrees with [`Self::cycle_time`].
    pub fn loop_iteration(&self, elapsed_secs: f64) -> u64 {
        self.split(elapsed_secs).0
    }

    // `t - cycle` is a whole number of loops, so rounding the quotient cannot land one
    // iteration away from the wrap that `%` produced.
    fn split(&self, elapsed_secs: f64) -> (u64, f64) {
        let t = sanitize(elapsed_secs);
        let cycle = t % self.loop_duration_secs;
        let iteration = ((t - cycle) / self.loop_duration_secs).round() as u64;
        (iteration, cycle)
    }

    /// Phase and progress at `elapsed_secs`.
    pub fn position_at(&self, elapsed_secs: f64) -> PhasePosition {
        let cycle = self.cycle_time(elapsed_secs);
        for (i, (&start, &dur)) in self.starts.iter().zip(&self.durations).enumerate() {
            if dur <= 0.0 {
                continue;
            }
            let end = start + dur;
            if cycle >= start - self.boundary_eps && cycle < end - self.boundary_eps {
                let progress = ((cycle - start) / dur).clamp(0.0, 1.0);
                return PhasePosition { phase: i, progress };
            }
        }

        // Rounding pushed `cycle` past the last boundary.
        PhasePosition {
            phase: self.fallback_phase,
            progress: 1.0,
        }
    }
}

fn sanitize(elapsed_secs: f64) -> f64 {
    if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        elapsed_secs
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
