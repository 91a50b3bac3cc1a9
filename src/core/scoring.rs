//! Per-capacity weighted scoring
//!
//! Each score is a fixed linear combination of normalized signals. Weights
//! need not sum to 1; the sum is clamped, never normalized, so a capacity
//! saturates at 1.0 when its raw sum exceeds it.

use crate::core::severity::clamp01;
use crate::types::{CapacityScores, CapacityWeights, NormalizedSignals};

/// Linear scorer over a fixed weight table
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityScorer {
    weights: CapacityWeights,
}

impl CapacityScorer {
    pub fn new(weights: CapacityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CapacityWeights {
        &self.weights
    }

    /// Score every capacity
    pub fn score(&self, s: &NormalizedSignals) -> CapacityScores {
        let w = &self.weights;

        let responsive = w.responsive.severity * s.severity
            + w.responsive.slope * s.trend_slope
            + w.responsive.inverse_buffer * s.inverse_buffer
            + w.responsive.ews * s.early_warning_prob;

        let reflexive = w.reflexive.oscillation * s.oscillation
            + w.reflexive.guardrail * s.guardrail_violation
            + w.reflexive.relative_error * s.relative_controller_error;

        let deliberative = w.deliberative.dispersion * s.dispersion
            + w.deliberative.hub * s.hub_saturation
            + w.deliberative.legitimacy * s.legitimacy_gap;

        let anticipatory =
            w.anticipatory.ews * s.early_warning_prob + w.anticipatory.lead_time * s.lead_time_weight;

        let structural = w.structural.persistence * s.persistence_fraction
            + w.structural.integral_error * s.integral_error
            + w.structural.data_penalty * s.data_quality_penalty;

        CapacityScores {
            responsive: clamp01(responsive),
            reflexive: clamp01(reflexive),
            deliberative: clamp01(deliberative),
            anticipatory: clamp01(anticipatory),
            structural: clamp01(structural),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReflexiveWeights, ResponsiveWeights};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_signals_score_zero() {
        let scores = CapacityScorer::default().score(&NormalizedSignals::default());
        assert_eq!(scores, CapacityScores::default());
    }

    #[test]
    fn test_responsive_formula() {
        let signals = NormalizedSignals {
            severity: 0.22,
            trend_slope: 0.7,
            inverse_buffer: 0.7,
            early_warning_prob: 0.55,
            ..Default::default()
        };
        let scores = CapacityScorer::default().score(&signals);
        // 0.45*0.22 + 0.2*0.7 + 0.2*0.7 + 0.25*0.55
        assert!(close(scores.responsive, 0.5165), "got {}", scores.responsive);
        // EWS feeds anticipatory too
        assert!(close(scores.anticipatory, 0.385), "got {}", scores.anticipatory);
    }

    #[test]
    fn test_structural_formula() {
        let signals = NormalizedSignals {
            persistence_fraction: 0.9,
            integral_error: 0.8,
            data_quality_penalty: 0.3,
            ..Default::default()
        };
        let scores = CapacityScorer::default().score(&signals);
        assert!(close(scores.structural, 0.75), "got {}", scores.structural);
        assert_eq!(scores.responsive, 0.0);
    }

    #[test]
    fn test_saturates_instead_of_normalizing() {
        // Responsive default weights sum to 1.10
        let signals = NormalizedSignals {
            severity: 1.0,
            trend_slope: 1.0,
            inverse_buffer: 1.0,
            early_warning_prob: 1.0,
            ..Default::default()
        };
        let scores = CapacityScorer::default().score(&signals);
        assert_eq!(scores.responsive, 1.0);
        assert_eq!(scores.anticipatory, 0.7);
    }

    #[test]
    fn test_custom_weights_apply() {
        let weights = CapacityWeights {
            reflexive: ReflexiveWeights {
                oscillation: 2.0,
                guardrail: 0.0,
                relative_error: 0.0,
            },
            responsive: ResponsiveWeights {
                severity: 0.0,
                slope: 0.0,
                inverse_buffer: 0.0,
                ews: 0.0,
            },
            ..Default::default()
        };
        let signals = NormalizedSignals {
            oscillation: 0.3,
            early_warning_prob: 1.0,
            ..Default::default()
        };
        let scores = CapacityScorer::new(weights).score(&signals);
        assert!(close(scores.reflexive, 0.6));
        assert_eq!(scores.responsive, 0.0);
    }
}
