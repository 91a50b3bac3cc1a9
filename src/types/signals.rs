//! Signal structures for a single indicator reading

use serde::{Deserialize, Serialize};

/// Acceptable tolerance range for an indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandContext {
    pub lower: f64,
    pub upper: f64,
}

impl BandContext {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the band; zero, negative or NaN means degenerate
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        span.is_nan() || span <= 0.0
    }
}

/// One observed reading plus optional normalized pressures in [0,1]
///
/// Absent signals mean "no evidence of this pressure".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalInputs {
    /// Observed indicator value
    pub value: f64,
    /// Tolerance band for `value`
    pub band: BandContext,
    /// Direction-adjusted trend slope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_slope: Option<f64>,
    /// Fraction of the window spent outside the band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence_fraction: Option<f64>,
    /// Cumulative (integral) error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral_error: Option<f64>,
    /// Oscillation amplitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillation: Option<f64>,
    /// Dispersion across related indicators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<f64>,
    /// Saturation of a shared resource hub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_saturation: Option<f64>,
    /// Early-warning probability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_warning_prob: Option<f64>,
    /// Buffer adequacy (1 = fully buffered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_adequacy: Option<f64>,
    /// Data-quality penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_penalty: Option<f64>,
    /// Legitimacy / trust gap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legitimacy_gap: Option<f64>,
    /// Guardrail violation indicator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrail_violation: Option<f64>,
    /// Relative controller error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_controller_error: Option<f64>,
    /// Usefulness of the available lead time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time_weight: Option<f64>,
}

impl SignalInputs {
    /// Reading with no optional signals
    pub fn new(value: f64, band: BandContext) -> Self {
        Self {
            value,
            band,
            trend_slope: None,
            persistence_fraction: None,
            integral_error: None,
            oscillation: None,
            dispersion: None,
            hub_saturation: None,
            early_warning_prob: None,
            buffer_adequacy: None,
            data_quality_penalty: None,
            legitimacy_gap: None,
            guardrail_violation: None,
            relative_controller_error: None,
            lead_time_weight: None,
        }
    }
}

/// Signals after defaulting and clamping, plus derived severity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSignals {
    pub severity: f64,
    pub trend_slope: f64,
    pub persistence_fraction: f64,
    pub integral_error: f64,
    pub oscillation: f64,
    pub dispersion: f64,
    pub hub_saturation: f64,
    pub early_warning_prob: f64,
    /// 1 − bufferAdequacy, or 0 when no buffer reading was supplied
    pub inverse_buffer: f64,
    pub data_quality_penalty: f64,
    pub legitimacy_gap: f64,
    pub guardrail_violation: f64,
    pub relative_controller_error: f64,
    pub lead_time_weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_bands() {
        assert!(!BandContext::new(0.0, 1.0).is_degenerate());
        assert!(BandContext::new(1.0, 1.0).is_degenerate());
        assert!(BandContext::new(2.0, 1.0).is_degenerate());
        assert!(BandContext::new(f64::NAN, 1.0).is_degenerate());
        assert!(BandContext::new(0.0, f64::NAN).is_degenerate());
    }
}
