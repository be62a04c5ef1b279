//! Contact-form relay: validation, email formatting, and delivery with a fallback sender.
//!
//! Independent of the animation runtime.

/// Outbound email formatting.
pub mod email;
/// Sender trait and the relay with its fallback identity.
pub mod relay;
/// Submitted form fields and their validation.
pub mod submission;
