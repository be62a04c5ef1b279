//! Rendering-fidelity tiers and the session-wide provider that decides them.

/// Device probes and the centralized tier provider.
pub mod provider;
/// Tier decision table and per-tier budgets.
pub mod tier;
