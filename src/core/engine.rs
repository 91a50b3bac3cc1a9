//! Capacity Engine: the five-stage decision pipeline
//!
//! normalize → severity → score → compose/override → metadata
//!
//! Pure and total: identical requests give identical results, nothing is
//! retained between calls, and no input can make it panic.

use tracing::debug;

use crate::core::composer::{self, Composition};
use crate::core::metadata::{classify_consent, guardrail_hint, rationale, suggest_srt};
use crate::core::scoring::CapacityScorer;
use crate::core::severity::normalize;
use crate::core::templates::template_actions;
use crate::types::{
    CapacityScores, ConfigOverrides, DecisionConfig, DecisionRequest, DecisionResult,
    NormalizedSignals,
};

/// Every intermediate value behind a decision
#[derive(Debug, Clone)]
pub struct DecisionTrace {
    /// Policy after merging request overrides
    pub config: DecisionConfig,
    pub signals: NormalizedSignals,
    pub scores: CapacityScores,
    pub composition: Composition,
    pub result: DecisionResult,
}

/// Decision engine pinned to a base policy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CapacityEngine {
    config: DecisionConfig,
}

impl CapacityEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// Built-in defaults with `overrides` layered on top
    pub fn with_overrides(overrides: &ConfigOverrides) -> Self {
        Self::new(DecisionConfig::default().merged(overrides))
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Compute the decision for one request
    pub fn evaluate(&self, request: &DecisionRequest) -> DecisionResult {
        self.trace(request).result
    }

    /// Compute the decision and keep the intermediate stages
    pub fn trace(&self, request: &DecisionRequest) -> DecisionTrace {
        let config = match &request.config {
            Some(overrides) => self.config.merged(overrides),
            None => self.config,
        };

        let signals = normalize(&request.reading);
        let scores = CapacityScorer::new(config.weights).score(&signals);
        debug!(
            loop_code = %request.loop_code,
            indicator = %request.indicator,
            severity = signals.severity,
            responsive = scores.responsive,
            reflexive = scores.reflexive,
            deliberative = scores.deliberative,
            anticipatory = scores.anticipatory,
            structural = scores.structural,
            "scored capacities"
        );

        let composition = composer::compose(
            &scores,
            config.near_tie_delta,
            signals.legitimacy_gap,
            request.is_life_safety(),
        );
        let primary = composition.primary();
        let order = composer::order(&composition.picked);

        let result = DecisionResult {
            scores,
            recommended_capacities: composition.picked.clone(),
            order,
            srt: suggest_srt(primary, scores.max()),
            guardrails: guardrail_hint(primary),
            consent: classify_consent(signals.legitimacy_gap),
            rationale: rationale(request, &signals, &scores, &composition.picked),
            template_actions: template_actions(&composition.picked),
        };
        debug!(
            primary = %primary,
            composed = result.is_composed(),
            horizon = %result.srt.horizon,
            "decision computed"
        );

        DecisionTrace {
            config,
            signals,
            scores,
            composition,
            result,
        }
    }
}

/// Evaluate one request against the built-in policy
pub fn compute_capacity_decision(request: &DecisionRequest) -> DecisionResult {
    CapacityEngine::default().evaluate(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BandContext, Capacity, DecisionContext, ReflexiveWeights, SignalInputs, Transparency,
        WeightOverrides,
    };

    fn request(reading: SignalInputs) -> DecisionRequest {
        DecisionRequest::new("L1", "ind", "2024-01-01T00:00:00Z", reading)
    }

    #[test]
    fn test_degenerate_band_all_zero() {
        let result =
            compute_capacity_decision(&request(SignalInputs::new(99.0, BandContext::new(4.0, 4.0))));
        assert_eq!(result.scores, CapacityScores::default());
        assert_eq!(result.primary(), Some(Capacity::Responsive));
        assert_eq!(result.consent.transparency, Transparency::None);
    }

    #[test]
    fn test_request_overrides_layer_on_engine_policy() {
        let base = ConfigOverrides {
            near_tie_delta: Some(0.5),
            ..Default::default()
        };
        let engine = CapacityEngine::with_overrides(&base);

        let request_overrides = ConfigOverrides {
            weights: Some(WeightOverrides {
                reflexive: Some(ReflexiveWeights {
                    oscillation: 1.0,
                    guardrail: 0.0,
                    relative_error: 0.0,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut reading = SignalInputs::new(20.0, BandContext::new(15.0, 25.0));
        reading.oscillation = Some(0.6);
        let trace = engine.trace(&request(reading).with_config(request_overrides));

        assert_eq!(trace.config.near_tie_delta, 0.5);
        assert_eq!(trace.config.weights.reflexive.oscillation, 1.0);
        assert!((trace.scores.reflexive - 0.6).abs() < 1e-9);
        // Engine policy itself is untouched
        assert_eq!(engine.config().weights.reflexive, ReflexiveWeights::default());
    }

    #[test]
    fn test_life_safety_suppresses_consent_override() {
        let mut reading = SignalInputs::new(10.0, BandContext::new(15.0, 25.0));
        reading.legitimacy_gap = Some(0.4);
        let with_safety = compute_capacity_decision(
            &request(reading.clone()).with_context(DecisionContext::life_safety()),
        );
        let without = compute_capacity_decision(&request(reading));

        assert_eq!(with_safety.recommended_capacities, vec![Capacity::Responsive]);
        assert_eq!(
            without.recommended_capacities,
            vec![Capacity::Responsive, Capacity::Deliberative]
        );
        // Disclosure is reported either way
        assert_eq!(with_safety.consent.transparency, Transparency::Pack);
    }

    #[test]
    fn test_template_actions_follow_pick_not_order() {
        let mut reading = SignalInputs::new(12.8, BandContext::new(15.0, 25.0));
        reading.trend_slope = Some(0.7);
        reading.buffer_adequacy = Some(0.3);
        reading.early_warning_prob = Some(0.55);
        let widened = ConfigOverrides {
            near_tie_delta: Some(0.2),
            ..Default::default()
        };
        let result = compute_capacity_decision(&request(reading).with_config(widened));

        assert_eq!(
            result.recommended_capacities,
            vec![Capacity::Responsive, Capacity::Anticipatory]
        );
        assert_eq!(result.order, vec![Capacity::Anticipatory, Capacity::Responsive]);
        let blocks: Vec<(Capacity, usize)> = result
            .template_actions
            .iter()
            .map(|a| (a.capacity, a.order))
            .collect();
        assert_eq!(
            blocks,
            vec![(Capacity::Responsive, 1), (Capacity::Anticipatory, 2)]
        );
    }
}
