//! Decision policy: thresholds and per-capacity weight tuples
//!
//! Overrides merge one capacity at a time. A supplied tuple replaces the
//! default tuple wholesale; fields it leaves out weigh zero.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::{DEFAULT_NEAR_TIE_DELTA, DEFAULT_PRIMARY_CUTOFF};

/// Responsive weights (defaults sum to 1.10)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveWeights {
    #[serde(default)]
    pub severity: f64,
    #[serde(default)]
    pub slope: f64,
    #[serde(default)]
    pub inverse_buffer: f64,
    #[serde(default)]
    pub ews: f64,
}

impl Default for ResponsiveWeights {
    fn default() -> Self {
        Self {
            severity: 0.45,
            slope: 0.20,
            inverse_buffer: 0.20,
            ews: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflexiveWeights {
    #[serde(default)]
    pub oscillation: f64,
    #[serde(default)]
    pub guardrail: f64,
    #[serde(default)]
    pub relative_error: f64,
}

impl Default for ReflexiveWeights {
    fn default() -> Self {
        Self {
            oscillation: 0.50,
            guardrail: 0.30,
            relative_error: 0.20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliberativeWeights {
    #[serde(default)]
    pub dispersion: f64,
    #[serde(default)]
    pub hub: f64,
    #[serde(default)]
    pub legitimacy: f64,
}

impl Default for DeliberativeWeights {
    fn default() -> Self {
        Self {
            dispersion: 0.45,
            hub: 0.30,
            legitimacy: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnticipatoryWeights {
    #[serde(default)]
    pub ews: f64,
    #[serde(default)]
    pub lead_time: f64,
}

impl Default for AnticipatoryWeights {
    fn default() -> Self {
        Self {
            ews: 0.70,
            lead_time: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralWeights {
    #[serde(default)]
    pub persistence: f64,
    #[serde(default)]
    pub integral_error: f64,
    #[serde(default)]
    pub data_penalty: f64,
}

impl Default for StructuralWeights {
    fn default() -> Self {
        Self {
            persistence: 0.50,
            integral_error: 0.30,
            data_penalty: 0.20,
        }
    }
}

/// One weight tuple per capacity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityWeights {
    pub responsive: ResponsiveWeights,
    pub reflexive: ReflexiveWeights,
    pub deliberative: DeliberativeWeights,
    pub anticipatory: AnticipatoryWeights,
    pub structural: StructuralWeights,
}

impl CapacityWeights {
    /// Replace each tuple named in `overrides`, keep the rest
    pub fn merged(&self, overrides: &WeightOverrides) -> Self {
        Self {
            responsive: overrides.responsive.unwrap_or(self.responsive),
            reflexive: overrides.reflexive.unwrap_or(self.reflexive),
            deliberative: overrides.deliberative.unwrap_or(self.deliberative),
            anticipatory: overrides.anticipatory.unwrap_or(self.anticipatory),
            structural: overrides.structural.unwrap_or(self.structural),
        }
    }

    /// Every weight, labelled `capacity.field`
    pub fn labelled(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("responsive.severity", self.responsive.severity),
            ("responsive.slope", self.responsive.slope),
            ("responsive.inverseBuffer", self.responsive.inverse_buffer),
            ("responsive.ews", self.responsive.ews),
            ("reflexive.oscillation", self.reflexive.oscillation),
            ("reflexive.guardrail", self.reflexive.guardrail),
            ("reflexive.relativeError", self.reflexive.relative_error),
            ("deliberative.dispersion", self.deliberative.dispersion),
            ("deliberative.hub", self.deliberative.hub),
            ("deliberative.legitimacy", self.deliberative.legitimacy),
            ("anticipatory.ews", self.anticipatory.ews),
            ("anticipatory.leadTime", self.anticipatory.lead_time),
            ("structural.persistence", self.structural.persistence),
            ("structural.integralError", self.structural.integral_error),
            ("structural.dataPenalty", self.structural.data_penalty),
        ]
    }
}

/// Fully resolved policy used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionConfig {
    /// Informational only; no composition step reads it
    pub primary_cutoff: f64,
    pub near_tie_delta: f64,
    pub weights: CapacityWeights,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            primary_cutoff: DEFAULT_PRIMARY_CUTOFF,
            near_tie_delta: DEFAULT_NEAR_TIE_DELTA,
            weights: CapacityWeights::default(),
        }
    }
}

impl DecisionConfig {
    /// Layer `overrides` on top of this policy
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            primary_cutoff: overrides.primary_cutoff.unwrap_or(self.primary_cutoff),
            near_tie_delta: overrides.near_tie_delta.unwrap_or(self.near_tie_delta),
            weights: match &overrides.weights {
                Some(w) => self.weights.merged(w),
                None => self.weights,
            },
        }
    }

    /// Built-in defaults with optional caller overrides
    pub fn resolve(overrides: Option<&ConfigOverrides>) -> Self {
        match overrides {
            Some(o) => Self::default().merged(o),
            None => Self::default(),
        }
    }
}

/// Per-capacity weight replacements
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflexive: Option<ReflexiveWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliberative: Option<DeliberativeWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipatory: Option<AnticipatoryWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralWeights>,
}

/// Caller-supplied policy; anything left out keeps its default
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_cutoff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_tie_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightOverrides>,
}

impl ConfigOverrides {
    /// Parse and validate a TOML policy document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let overrides: ConfigOverrides = toml::from_str(s)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Read a TOML policy file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject non-finite or negative policy values
    ///
    /// Only policy files go through this; the engine itself accepts anything.
    pub fn validate(&self) -> Result<()> {
        if let Some(cutoff) = self.primary_cutoff {
            if !cutoff.is_finite() || !(0.0..=1.0).contains(&cutoff) {
                return Err(EngineError::InvalidConfig(format!(
                    "primaryCutoff must be within [0,1], got {}",
                    cutoff
                )));
            }
        }
        if let Some(delta) = self.near_tie_delta {
            if !delta.is_finite() || delta < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "nearTieDelta must be a non-negative number, got {}",
                    delta
                )));
            }
        }
        if let Some(weights) = &self.weights {
            let resolved = CapacityWeights::default().merged(weights);
            for (label, w) in resolved.labelled() {
                if !w.is_finite() || w < 0.0 {
                    return Err(EngineError::InvalidConfig(format!(
                        "weight {} must be a non-negative number, got {}",
                        label, w
                    )));
                }
            }
        }
        Ok(())
    }
}
