//! Timeline configuration, the phase clock and scroll-coupled speed.

/// Elapsed time to `(phase, progress)` mapping.
pub mod clock;
/// Immutable loop configuration.
pub mod config;
/// Scroll-coupled speed multiplier.
pub mod speed;
