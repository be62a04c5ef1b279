//! Visibility gating: viewport intersection AND tab visibility.

/// Observer state and the combined gate.
pub mod visibility;
