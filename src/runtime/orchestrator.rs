use crate::{
    capability::{
        provider::{CapabilityProvider, TierChange},
        tier::CapabilityTier,
    },
    foundation::{core::FrameSample, error::MotionResult},
    gate::visibility::{GateTransition, VisibilityGate},
    render::{
        poster::poster_svg,
        target::{RenderTarget, VisualState},
        targets::payment_flow_targets,
    },
    runtime::{playback::PlaybackState, scroll::ScrollReader},
    timeline::{clock::PhaseClock, config::TimelineConfig, speed::SpeedModulation},
};

/// One redraw's worth of output.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedFrame {
    pub sample: FrameSample,
    pub speed: f64,
    pub visuals: Vec<VisualState>,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Time advanced and exactly one frame was composed.
    Rendered(RenderedFrame),
    /// Under the tier's frame-rate ceiling; delta carried to the next tick.
    Throttled,
    /// Visibility gate is closed; nothing mutated.
    Gated,
    /// Static tier; nothing mutated.
    Static,
    /// Callback for a request that is no longer pending.
    Stale,
}

impl TickOutcome {
    pub fn frame(&self) -> Option<&RenderedFrame> {
        match self {
            Self::Rendered(f) => Some(f),
            _ => None,
        }
    }
}

/// Drives one mounted instance of the visual.
///
/// Each tick advances effective time by the measured real delta (clamped to
/// `max_tick_delta_secs`) scaled by the scroll-coupled speed, maps it to a phase, and composes
/// all render targets once. Time never advances while the gate is closed or the tier is static,
/// and the first tick after either reopens re-anchors with zero delta.
pub struct Orchestrator {
    config: TimelineConfig,
    clock: PhaseClock,
    speed: SpeedModulation,
    max_tick_delta_secs: f64,
    scroll: ScrollReader,
    gate: VisibilityGate,
    capability: CapabilityProvider,
    targets: Vec<Box<dyn RenderTarget>>,
    state: PlaybackState,
    last_timestamp_secs: Option<f64>,
    pending_delta_secs: f64,
}

impl Orchestrator {
    #[tracing::instrument(
        skip_all,
        fields(phases = config.phase_count(), tier = ?capability.tier())
    )]
    pub fn new(
        config: &TimelineConfig,
        capability: CapabilityProvider,
        scroll: ScrollReader,
    ) -> MotionResult<Self> {
        let clock = PhaseClock::new(config)?;
        let speed = config.speed;
        let initial_speed = speed.multiplier(scroll.get());
        Ok(Self {
            config: config.clone(),
            clock,
            speed,
            max_tick_delta_secs: config.max_tick_delta_secs,
            scroll,
            gate: VisibilityGate::default(),
            capability,
            targets: Vec::new(),
            state: PlaybackState::new(initial_speed),
            last_timestamp_secs: None,
            pending_delta_secs: 0.0,
        })
    }

    /// The payment-flow preset with its four built-in targets.
    pub fn payment_flow(
        capability: CapabilityProvider,
        scroll: ScrollReader,
        seed: u64,
    ) -> MotionResult<Self> {
        Ok(Self::new(&TimelineConfig::payment_flow(), capability, scroll)?
            .with_targets(payment_flow_targets(seed)))
    }

    pub fn with_gate(mut self, gate: VisibilityGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_targets(mut self, targets: Vec<Box<dyn RenderTarget>>) -> Self {
        self.targets = targets;
        self
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn sample(&self) -> FrameSample {
        self.state.sample()
    }

    pub fn phase_name(&self) -> Option<&str> {
        self.config.phase_name(self.state.phase)
    }

    pub fn tier(&self) -> CapabilityTier {
        self.capability.tier()
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    /// Whether the host should keep a frame request pending.
    pub fn should_schedule(&self) -> bool {
        self.capability.tier().animates() && self.gate.is_open()
    }

    pub fn set_viewport_visible(&mut self, visible: bool) -> GateTransition {
        let t = self.gate.set_viewport_visible(visible);
        self.on_gate_transition(t, "viewport");
        t
    }

    pub fn set_tab_visible(&mut self, visible: bool) -> GateTransition {
        let t = self.gate.set_tab_visible(visible);
        self.on_gate_transition(t, "tab");
        t
    }

    fn on_gate_transition(&mut self, t: GateTransition, source: &'static str) {
        match t {
            GateTransition::Closed => {
                self.suspend();
                tracing::debug!(
                    source,
                    elapsed = self.state.elapsed_secs,
                    "visibility gate closed"
                );
            }
            GateTransition::Opened => {
                tracing::debug!(
                    source,
                    elapsed = self.state.elapsed_secs,
                    "visibility gate opened"
                );
            }
            GateTransition::Unchanged => {}
        }
    }

    /// OS-level motion preference changed mid-session.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> Option<TierChange> {
        let change = self.capability.set_reduced_motion(reduced_motion)?;
        if change.stops_loop() {
            self.suspend();
        }
        Some(change)
    }

    fn suspend(&mut self) {
        self.last_timestamp_secs = None;
        self.pending_delta_secs = 0.0;
    }

    /// Run one frame at host time `now_secs` (any monotonic clock, in seconds).
    pub fn tick(&mut self, now_secs: f64) -> TickOutcome {
        if !self.capability.tier().animates() {
            self.suspend();
            return TickOutcome::Static;
        }
        if !self.gate.is_open() {
            self.suspend();
            return TickOutcome::Gated;
        }

        let delta = match self.last_timestamp_secs {
            Some(prev) if now_secs.is_finite() => {
                clamp_delta(now_secs - prev, self.max_tick_delta_secs)
            }
            _ => 0.0,
        };
        if now_secs.is_finite() {
            self.last_timestamp_secs = Some(now_secs);
        }

        let budget = self.capability.budget();
        let min_interval = budget.min_frame_interval_secs();
        // The carry must be able to reach the throttle interval even under a one-frame delta cap.
        let carry_cap = min_interval.map_or(self.max_tick_delta_secs, |m| {
            m.max(self.max_tick_delta_secs)
        });
        self.pending_delta_secs = (self.pending_delta_secs + delta).min(carry_cap);

        if let Some(min_interval) = min_interval
            && self.state.frames_rendered > 0
            && self.pending_delta_secs + 1e-9 < min_interval
        {
            return TickOutcome::Throttled;
        }

        let speed = self.speed.multiplier(self.scroll.get());
        self.state.speed = speed;
        self.state.elapsed_secs += self.pending_delta_secs * speed;
        self.pending_delta_secs = 0.0;

        let pos = self.clock.position_at(self.state.elapsed_secs);
        if pos.phase != self.state.phase {
            tracing::trace!(
                phase = pos.phase,
                name = self.config.phase_name(pos.phase),
                "phase entered"
            );
        }
        self.state.phase = pos.phase;
        self.state.progress = pos.progress;
        self.state.loop_iteration = self.clock.loop_iteration(self.state.elapsed_secs);
        self.state.frames_rendered += 1;

        let sample = self.state.sample();
        let visuals = self
            .targets
            .iter()
            .filter_map(|t| t.compose(&sample, &budget))
            .collect();
        TickOutcome::Rendered(RenderedFrame {
            sample,
            speed,
            visuals,
        })
    }

    /// Markup for the static tier's single illustration.
    pub fn static_poster_svg(&self, width: u32, height: u32) -> String {
        poster_svg(&self.config, width, height)
    }
}

fn clamp_delta(delta: f64, max: f64) -> f64 {
    if delta.is_finite() {
        delta.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/orchestrator.rs"]
mod tests;
