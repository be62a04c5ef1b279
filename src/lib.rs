//! Phase-driven animation orchestration for the Kodano payment-flow visualization.
//!
//! A looping card → extraction → tokenization → routing → processing → approval → settlement
//! sequence, driven one host frame at a time:
//!
//! 1. **Gate**: the loop runs only while the element is (nearly) in view and the tab is visible,
//!    and only if the session's [`CapabilityTier`] animates at all.
//! 2. **Advance**: effective time grows by the measured real delta, clamped, and scaled by the
//!    scroll-coupled [`SpeedModulation`].
//! 3. **Map**: the [`PhaseClock`] turns effective time into `(phase, progress)`.
//! 4. **Compose**: every [`RenderTarget`] turns the [`FrameSample`] into visual state, once.
//!
//! The static tier renders a single poster instead (see [`render_static_poster`]).
//!
//! The [`contact`] module is the site's contact-form relay and has no dependency on the
//! animation runtime.
#![forbid(unsafe_code)]

mod capability;
mod foundation;
mod gate;
mod render;
mod runtime;
mod timeline;

/// Contact-form validation, formatting and delivery.
pub mod contact;

pub use capability::provider::{
    CapabilityProbe, CapabilityProvider, DeviceProfile, LOW_END_MAX_CORES, LOW_END_MAX_MEMORY_GB,
    MOBILE_MAX_WIDTH_PX, TierChange,
};
pub use capability::tier::{CapabilitySignals, CapabilityTier, RenderBudget, decide_tier};
pub use foundation::core::{Affine, BezPath, FrameSample, Point, Rect, Vec2, clamp01, finite_or};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::rng::{RandomSource, Rng64};
pub use gate::visibility::{
    DEFAULT_ROOT_MARGIN_PX, GateTransition, Observation, ObserverSupport, ViewportObserver,
    VisibilityGate,
};
pub use render::ease::Ease;
pub use render::poster::{PosterImage, poster_svg, rasterize_poster, render_static_poster};
pub use render::target::{RenderTarget, VisualElement, VisualState};
pub use render::targets::{
    CardTarget, ParticleTarget, ProcessingTarget, RoutingTarget, payment_flow_targets, plan_routes,
    route_curve,
};
pub use runtime::animation_loop::AnimationLoop;
pub use runtime::headless::{HeadlessReport, HeadlessRun, HostEvent};
pub use runtime::orchestrator::{Orchestrator, RenderedFrame, TickOutcome};
pub use runtime::playback::PlaybackState;
pub use runtime::scheduler::{FrameRequestId, FrameScheduler, ManualScheduler};
pub use runtime::scroll::{ScrollReader, ScrollSignal};
pub use timeline::clock::{PhaseClock, PhasePosition};
pub use timeline::config::{
    DEFAULT_MAX_TICK_DELTA_SECS, PaymentPhase, PhaseSpec, TimelineConfig, WEIGHT_SUM_TOLERANCE,
};
pub use timeline::speed::SpeedModulation;
