//! Render-target contract, the built-in payment-flow targets and the static poster.

/// Easing curves used by the built-in targets.
pub mod ease;
/// Static-tier SVG illustration and its rasterization.
pub mod poster;
/// The [`target::RenderTarget`] contract and visual state types.
pub mod target;
/// Card, particle, routing and processing targets.
pub mod targets;
