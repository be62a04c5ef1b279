//! The frame loop: orchestrator, scheduling and host-facing signals.

/// Cancel-on-drop loop that owns one orchestrator and one scheduler.
pub mod animation_loop;
/// Fixed-rate driver used by the CLI and tests.
pub mod headless;
/// Per-tick time advance, phase mapping and composition.
pub mod orchestrator;
/// Mutable playback data owned by one orchestrator.
pub mod playback;
/// Host frame-callback abstraction.
pub mod scheduler;
/// Host-owned scroll depth and its read-only handle.
pub mod scroll;
