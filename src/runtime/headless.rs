use crate::{
    foundation::{
        core::Rect,
        error::{MotionError, MotionResult},
    },
    gate::visibility::ViewportObserver,
    runtime::{
        animation_loop::AnimationLoop,
        orchestrator::{RenderedFrame, TickOutcome},
        scheduler::ManualScheduler,
        scroll::ScrollSignal,
    },
};

/// A host-side change applied at a point in host time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Viewport { at_secs: f64, visible: bool },
    /// Layout report; visibility is decided by the run's [`ViewportObserver`].
    ViewportRect {
        at_secs: f64,
        element: Rect,
        viewport: Rect,
    },
    Tab { at_secs: f64, visible: bool },
    ReducedMotion { at_secs: f64, enabled: bool },
    Scroll { at_secs: f64, value: f64 },
}

impl HostEvent {
    pub fn at_secs(&self) -> f64 {
        match *self {
            Self::Viewport { at_secs, .. }
            | Self::ViewportRect { at_secs, .. }
            | Self::Tab { at_secs, .. }
            | Self::ReducedMotion { at_secs, .. }
            | Self::Scroll { at_secs, .. } => at_secs,
        }
    }
}

/// Fixed-rate host simulation: a vsync every `1 / fps` seconds for `duration_secs`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeadlessRun {
    pub fps: f64,
    pub duration_secs: f64,
    #[serde(default)]
    pub events: Vec<HostEvent>,
    #[serde(default)]
    pub observer: ViewportObserver,
}

/// Everything a headless run produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct HeadlessReport {
    pub frames: Vec<RenderedFrame>,
    /// Vsyncs that delivered a pending request.
    pub callbacks: u64,
    /// Vsyncs with nothing pending (loop suspended).
    pub idle_vsyncs: u64,
    pub throttled: u64,
}

impl HeadlessRun {
    pub fn new(fps: f64, duration_secs: f64) -> Self {
        Self {
            fps,
            duration_secs,
            events: Vec::new(),
            observer: ViewportObserver::default(),
        }
    }

    pub fn with_observer(mut self, observer: ViewportObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_event(mut self, event: HostEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(MotionError::validation("fps must be finite and > 0"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(MotionError::validation(
                "duration_secs must be finite and >= 0",
            ));
        }
        if self.events.iter().any(|e| !e.at_secs().is_finite()) {
            return Err(MotionError::validation("event times must be finite"));
        }
        Ok(())
    }

    /// Mount `anim` if needed and deliver vsyncs, applying events at their host times.
    #[tracing::instrument(skip_all, fields(fps = self.fps, duration = self.duration_secs))]
    pub fn drive(
        &self,
        anim: &mut AnimationLoop<ManualScheduler>,
        scroll: &ScrollSignal,
    ) -> MotionResult<HeadlessReport> {
        self.validate()?;

        let mut events = self.events.clone();
        events.sort_by(|a, b| a.at_secs().total_cmp(&b.at_secs()));
        let mut events = events.into_iter().peekable();

        if !anim.is_mounted() {
            anim.mount();
        }

        let mut report = HeadlessReport::default();
        let steps = (self.duration_secs * self.fps).round() as u64;
        for i in 0..=steps {
            let now = i as f64 / self.fps;
            while let Some(ev) = events.next_if(|e| e.at_secs() <= now) {
                apply(anim, scroll, &self.observer, &ev);
            }

            let Some(id) = anim.scheduler().pop_due() else {
                report.idle_vsyncs += 1;
                continue;
            };
            report.callbacks += 1;
            match anim.on_frame(id, now) {
                TickOutcome::Rendered(frame) => report.frames.push(frame),
                TickOutcome::Throttled => report.throttled += 1,
                TickOutcome::Gated | TickOutcome::Static | TickOutcome::Stale => {}
            }
        }

        tracing::debug!(
            frames = report.frames.len(),
            idle = report.idle_vsyncs,
            "headless run finished"
        );
        Ok(report)
    }
}

fn apply(
    anim: &mut AnimationLoop<ManualScheduler>,
    scroll: &ScrollSignal,
    observer: &ViewportObserver,
    ev: &HostEvent,
) {
    match *ev {
        HostEvent::Viewport { visible, .. } => {
            anim.set_viewport_visible(visible);
        }
        HostEvent::ViewportRect {
            element, viewport, ..
        } => {
            anim.observe_viewport(observer, element, viewport);
        }
        HostEvent::Tab { visible, .. } => {
            anim.set_tab_visible(visible);
        }
        HostEvent::ReducedMotion { enabled, .. } => {
            anim.set_reduced_motion(enabled);
        }
        HostEvent::Scroll { value, .. } => scroll.set(value),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/headless.rs"]
mod tests;
