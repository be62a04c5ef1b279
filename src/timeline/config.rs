use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{MotionError, MotionResult},
    timeline::speed::SpeedModulation,
};

/// Allowed drift of the phase weight sum away from `1.0`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default cap on a single tick's real delta, in seconds.
pub const DEFAULT_MAX_TICK_DELTA_SECS: f64 = 0.1;

/// The seven stages of the payment-flow visualization, in loop order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPhase {
    Card,
    Extraction,
    Tokenization,
    Routing,
    Processing,
    Approval,
    Settlement,
}

impl PaymentPhase {
    /// All phases in loop order.
    pub const ALL: [PaymentPhase; 7] = [
        Self::Card,
        Self::Extraction,
        Self::Tokenization,
        Self::Routing,
        Self::Processing,
        Self::Approval,
        Self::Settlement,
    ];

    /// Stable lowercase name, also used as the phase name in [`TimelineConfig::payment_flow`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Extraction => "extraction",
            Self::Tokenization => "tokenization",
            Self::Routing => "routing",
            Self::Processing => "processing",
            Self::Approval => "approval",
            Self::Settlement => "settlement",
        }
    }

    /// Phase at a timeline index, if the timeline follows the payment-flow layout.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Look up by [`PaymentPhase::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// One named stage of the loop and its share of the loop duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    pub weight: f64, // fraction of loop_duration_secs
}

/// Immutable loop configuration, supplied once when the visual mounts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    pub loop_duration_secs: f64,
    pub phases: Vec<PhaseSpec>,
    #[serde(default = "SpeedModulation::urgent")]
    pub speed: SpeedModulation,
    #[serde(default = "default_max_tick_delta")]
    pub max_tick_delta_secs: f64,
}

fn default_max_tick_delta() -> f64 {
    DEFAULT_MAX_TICK_DELTA_SECS
}

impl TimelineConfig {
    /// Build and validate a configuration from explicit weights.
    pub fn new(loop_duration_secs: f64, phases: Vec<PhaseSpec>) -> MotionResult<Self> {
        let cfg = Self {
            loop_duration_secs,
            phases,
            speed: SpeedModulation::urgent(),
            max_tick_delta_secs: DEFAULT_MAX_TICK_DELTA_SECS,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build from per-phase durations in seconds; the loop duration is their sum.
    pub fn from_durations<S: Into<String>>(
        durations: impl IntoIterator<Item = (S, f64)>,
    ) -> MotionResult<Self> {
        let durations: Vec<(String, f64)> =
            durations.into_iter().map(|(n, d)| (n.into(), d)).collect();
        if durations.iter().any(|(_, d)| !d.is_finite() || *d < 0.0) {
            return Err(MotionError::timeline(
                "phase durations must be finite and >= 0",
            ));
        }
        let total: f64 = durations.iter().map(|(_, d)| d).sum();
        if total <= 0.0 {
            return Err(MotionError::timeline(
                "phase durations must sum to a positive loop duration",
            ));
        }
        let phases = durations
            .into_iter()
            .map(|(name, d)| PhaseSpec {
                name,
                weight: d / total,
            })
            .collect();
        Self::new(total, phases)
    }

    /// The 12 second payment-flow loop: five 2 s stages followed by two 1 s stages.
    pub fn payment_flow() -> Self {
        let durations = [2.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0];
        Self {
            loop_duration_secs: 12.0,
            phases: PaymentPhase::ALL
                .iter()
                .zip(durations)
                .map(|(p, d)| PhaseSpec {
                    name: p.name().to_owned(),
                    weight: d / 12.0,
                })
                .collect(),
            speed: SpeedModulation::urgent(),
            max_tick_delta_secs: DEFAULT_MAX_TICK_DELTA_SECS,
        }
    }

    /// Replace the speed modulation.
    pub fn with_speed(mut self, speed: SpeedModulation) -> Self {
        self.speed = speed;
        self
    }

    /// Replace the per-tick delta cap.
    pub fn with_max_tick_delta(mut self, secs: f64) -> Self {
        self.max_tick_delta_secs = secs;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.loop_duration_secs.is_finite() || self.loop_duration_secs <= 0.0 {
            return Err(MotionError::validation(
                "loop_duration_secs must be finite and > 0",
            ));
        }
        if self.phases.is_empty() {
            return Err(MotionError::timeline("timeline must have at least one phase"));
        }
        for phase in &self.phases {
            if !phase.weight.is_finite() || phase.weight < 0.0 {
                return Err(MotionError::timeline(format!(
                    "phase '{}' weight must be finite and >= 0",
                    phase.name
                )));
            }
        }
        if self.phases.iter().all(|p| p.weight == 0.0) {
            return Err(MotionError::timeline(
                "at least one phase weight must be positive",
            ));
        }
        let sum: f64 = self.phases.iter().map(|p| p.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MotionError::timeline(format!(
                "phase weights must sum to 1.0 (got {sum})"
            )));
        }
        if !self.max_tick_delta_secs.is_finite() || self.max_tick_delta_secs <= 0.0 {
            return Err(MotionError::validation(
                "max_tick_delta_secs must be finite and > 0",
            ));
        }
        self.speed.validate()
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn phase_name(&self, idx: usize) -> Option<&str> {
        self.phases.get(idx).map(|p| p.name.as_str())
    }

    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::payment_flow()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
