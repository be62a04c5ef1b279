/// Rendering fidelity, chosen once per session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTier {
    /// One non-animated illustration; no frame scheduling.
    Static,
    /// Animated with fewer elements and a frame-rate ceiling.
    Reduced,
    /// Natural frame rate, full density.
    Full,
}

impl CapabilityTier {
    /// Whether this tier runs the frame loop at all.
    pub fn animates(self) -> bool {
        !matches!(self, Self::Static)
    }

    pub fn budget(self) -> RenderBudget {
        match self {
            Self::Full => RenderBudget {
                particle_count: 48,
                route_count: 6,
                network_nodes: 12,
                max_fps: None,
            },
            Self::Reduced => RenderBudget {
                particle_count: 16,
                route_count: 3,
                network_nodes: 6,
                max_fps: Some(30.0),
            },
            Self::Static => RenderBudget {
                particle_count: 0,
                route_count: 0,
                network_nodes: 0,
                max_fps: None,
            },
        }
    }
}

/// Visual density and pacing allowed for a tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderBudget {
    pub particle_count: u32,
    pub route_count: u32,
    pub network_nodes: u32,
    pub max_fps: Option<f64>, // None: host's natural rate
}

impl RenderBudget {
    /// Minimum real seconds between rendered ticks, if capped.
    pub fn min_frame_interval_secs(&self) -> Option<f64> {
        self.max_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .map(|fps| 1.0 / fps)
    }
}

/// The three boolean inputs to the decision table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilitySignals {
    pub reduced_motion: bool,
    pub mobile: bool,
    pub low_end: bool,
}

/// reduced-motion wins outright; mobile or low-end devices get the reduced tier.
pub fn decide_tier(signals: CapabilitySignals) -> CapabilityTier {
    if signals.reduced_motion {
        CapabilityTier::Static
    } else if signals.mobile || signals.low_end {
        CapabilityTier::Reduced
    } else {
        CapabilityTier::Full
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capability/tier.rs"]
mod tests;
