use crate::{
    capability::provider::TierChange,
    foundation::core::Rect,
    gate::visibility::{GateTransition, ViewportObserver},
    runtime::{
        orchestrator::{Orchestrator, TickOutcome},
        scheduler::{FrameRequestId, FrameScheduler},
    },
};

/// Owns one orchestrator and keeps at most one frame request pending for it.
///
/// A request is pending exactly while the loop is mounted, the tier animates and the visibility
/// gate is open. Dropping the loop cancels any pending request.
pub struct AnimationLoop<S: FrameScheduler> {
    orchestrator: Orchestrator,
    scheduler: S,
    pending: Option<FrameRequestId>,
    mounted: bool,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(orchestrator: Orchestrator, scheduler: S) -> Self {
        Self {
            orchestrator,
            scheduler,
            pending: None,
            mounted: false,
        }
    }

    #[tracing::instrument(skip(self), fields(tier = ?self.orchestrator.tier()))]
    pub fn mount(&mut self) {
        self.mounted = true;
        self.sync_schedule();
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cancel_pending();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Host callback for request `id` at host time `now_secs`.
    pub fn on_frame(&mut self, id: FrameRequestId, now_secs: f64) -> TickOutcome {
        if self.pending != Some(id) {
            return TickOutcome::Stale;
        }
        self.pending = None;
        let outcome = self.orchestrator.tick(now_secs);
        self.sync_schedule();
        outcome
    }

    pub fn set_viewport_visible(&mut self, visible: bool) -> GateTransition {
        let t = self.orchestrator.set_viewport_visible(visible);
        self.sync_schedule();
        t
    }

    /// Feed element and viewport rectangles through `observer` into the viewport signal.
    pub fn observe_viewport(
        &mut self,
        observer: &ViewportObserver,
        element: Rect,
        viewport: Rect,
    ) -> GateTransition {
        self.set_viewport_visible(observer.intersects(element, viewport))
    }

    pub fn set_tab_visible(&mut self, visible: bool) -> GateTransition {
        let t = self.orchestrator.set_tab_visible(visible);
        self.sync_schedule();
        t
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> Option<TierChange> {
        let change = self.orchestrator.set_reduced_motion(reduced_motion);
        self.sync_schedule();
        change
    }

    fn sync_schedule(&mut self) {
        let want = self.mounted && self.orchestrator.should_schedule();
        match (want, self.pending) {
            (true, None) => self.pending = Some(self.scheduler.request_frame()),
            (false, Some(_)) => self.cancel_pending(),
            _ => {}
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

impl<S: FrameScheduler> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/animation_loop.rs"]
mod tests;
