use crate::{
    capability::tier::{CapabilitySignals, CapabilityTier, RenderBudget, decide_tier},
    foundation::error::{MotionError, MotionResult},
};

/// Viewports narrower than this count as mobile.
pub const MOBILE_MAX_WIDTH_PX: f64 = 768.0;
/// At or below this many logical cores the device counts as low-end.
pub const LOW_END_MAX_CORES: u32 = 4;
/// At or below this much reported memory the device counts as low-end.
pub const LOW_END_MAX_MEMORY_GB: f64 = 4.0;

const MOBILE_UA_TOKENS: [&str; 5] = ["Mobi", "Android", "iPhone", "iPad", "iPod"];

/// Host-side answers to the capability questions.
pub trait CapabilityProbe {
    /// Whether a drawing surface (canvas or GPU context) could be created.
    fn has_render_surface(&self) -> MotionResult<bool>;
    fn prefers_reduced_motion(&self) -> MotionResult<bool>;
    fn is_mobile(&self) -> MotionResult<bool>;
    fn is_low_end(&self) -> MotionResult<bool>;
}

/// Raw environment hints as a host would report them. Every field is optional because browsers
/// expose different subsets.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceProfile {
    #[serde(default)]
    pub render_surface: Option<bool>,
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    #[serde(default)]
    pub viewport_width_px: Option<f64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub hardware_concurrency: Option<u32>,
    #[serde(default)]
    pub device_memory_gb: Option<f64>,
}

impl DeviceProfile {
    /// A desktop that answers every probe and qualifies for the full tier.
    pub fn desktop() -> Self {
        Self {
            render_surface: Some(true),
            reduced_motion: Some(false),
            viewport_width_px: Some(1440.0),
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_owned()),
            hardware_concurrency: Some(8),
            device_memory_gb: Some(8.0),
        }
    }
}

fn is_mobile_user_agent(ua: &str) -> bool {
    MOBILE_UA_TOKENS.iter().any(|t| ua.contains(t))
}

impl CapabilityProbe for DeviceProfile {
    fn has_render_surface(&self) -> MotionResult<bool> {
        self.render_surface
            .ok_or_else(|| MotionError::capability("render surface availability is unknown"))
    }

    fn prefers_reduced_motion(&self) -> MotionResult<bool> {
        self.reduced_motion
            .ok_or_else(|| MotionError::capability("motion preference is not observable"))
    }

    fn is_mobile(&self) -> MotionResult<bool> {
        let by_ua = self.user_agent.as_deref().map(is_mobile_user_agent);
        match (self.viewport_width_px, by_ua) {
            (Some(w), ua) if w.is_finite() => Ok(w < MOBILE_MAX_WIDTH_PX || ua.unwrap_or(false)),
            (_, Some(ua)) => Ok(ua),
            _ => Err(MotionError::capability(
                "neither viewport width nor user agent is available",
            )),
        }
    }

    // Missing hints are common (Safari hides deviceMemory) and do not imply a weak device.
    fn is_low_end(&self) -> MotionResult<bool> {
        let few_cores = self
            .hardware_concurrency
            .is_some_and(|c| c > 0 && c <= LOW_END_MAX_CORES);
        let little_memory = self
            .device_memory_gb
            .is_some_and(|m| m.is_finite() && m <= LOW_END_MAX_MEMORY_GB);
        Ok(few_cores || little_memory)
    }
}

/// Tier change caused by a runtime motion-preference event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierChange {
    pub from: CapabilityTier,
    pub to: CapabilityTier,
}

impl TierChange {
    /// The loop must stop scheduling immediately.
    pub fn stops_loop(&self) -> bool {
        self.from.animates() && !self.to.animates()
    }

    pub fn starts_loop(&self) -> bool {
        !self.from.animates() && self.to.animates()
    }
}

/// The one place the session's tier is decided and held.
#[derive(Clone, Debug, PartialEq)]
pub struct CapabilityProvider {
    signals: CapabilitySignals,
    tier: CapabilityTier,
    // Set when probing failed; pins the tier to Static.
    degraded: bool,
}

impl CapabilityProvider {
    /// Probe once. A missing render surface or any failed probe degrades to the static tier.
    #[tracing::instrument(skip(probe))]
    pub fn probe(probe: &dyn CapabilityProbe) -> Self {
        let signals = (|| -> MotionResult<CapabilitySignals> {
            if !probe.has_render_surface()? {
                return Err(MotionError::capability("no rendering surface available"));
            }
            Ok(CapabilitySignals {
                reduced_motion: probe.prefers_reduced_motion()?,
                mobile: probe.is_mobile()?,
                low_end: probe.is_low_end()?,
            })
        })();

        match signals {
            Ok(signals) => {
                let provider = Self::from_signals(signals);
                tracing::debug!(tier = ?provider.tier, ?signals, "capability tier decided");
                provider
            }
            Err(err) => {
                tracing::warn!(error = %err, "capability detection failed; using static tier");
                Self {
                    signals: CapabilitySignals::default(),
                    tier: CapabilityTier::Static,
                    degraded: true,
                }
            }
        }
    }

    pub fn from_signals(signals: CapabilitySignals) -> Self {
        Self {
            signals,
            tier: decide_tier(signals),
            degraded: false,
        }
    }

    /// Pin to a tier regardless of signals (hosts that already know the answer).
    pub fn fixed(tier: CapabilityTier) -> Self {
        Self {
            signals: CapabilitySignals {
                reduced_motion: tier == CapabilityTier::Static,
                ..CapabilitySignals::default()
            },
            tier,
            degraded: false,
        }
    }

    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    pub fn signals(&self) -> CapabilitySignals {
        self.signals
    }

    pub fn budget(&self) -> RenderBudget {
        self.tier.budget()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// React to an OS-level motion preference change. Returns the tier change, if any.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> Option<TierChange> {
        self.signals.reduced_motion = reduced_motion;
        if self.degraded {
            return None;
        }
        let from = self.tier;
        let to = decide_tier(self.signals);
        if from == to {
            return None;
        }
        self.tier = to;
        tracing::debug!(?from, ?to, "capability tier re-evaluated");
        Some(TierChange { from, to })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capability/provider.rs"]
mod tests;
