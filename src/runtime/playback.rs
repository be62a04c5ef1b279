use crate::foundation::core::FrameSample;

/// Mutable playback data. Exactly one orchestrator owns each instance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    pub elapsed_secs: f64, // effective, speed-scaled
    pub phase: usize,
    pub progress: f64,
    pub speed: f64,
    pub loop_iteration: u64,
    pub frames_rendered: u64,
}

impl PlaybackState {
    pub fn new(initial_speed: f64) -> Self {
        Self {
            elapsed_secs: 0.0,
            phase: 0,
            progress: 0.0,
            speed: initial_speed,
            loop_iteration: 0,
            frames_rendered: 0,
        }
    }

    pub fn sample(&self) -> FrameSample {
        FrameSample {
            phase: self.phase,
            progress: self.progress,
            global_time_secs: self.elapsed_secs,
            loop_iteration: self.loop_iteration,
        }
    }
}
