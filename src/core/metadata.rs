//! Derived metadata: review horizon, guardrails, consent, rationale

use crate::types::{
    Cadence, Capacity, CapacityScores, ConsentInfo, DecisionRequest, GuardrailHint, Horizon,
    NormalizedSignals, SrtSuggestion, Transparency,
};
use crate::{INTENSE_SCORE_THRESHOLD, LEGITIMACY_BANNER_THRESHOLD, LEGITIMACY_PACK_THRESHOLD};

/// Review horizon and cadence for the primary capacity
pub fn suggest_srt(primary: Capacity, top_score: f64) -> SrtSuggestion {
    let intense = top_score >= INTENSE_SCORE_THRESHOLD;
    let (horizon, cadence) = match primary {
        Capacity::Responsive => (
            if intense { Horizon::P14D } else { Horizon::P30D },
            Cadence::Daily,
        ),
        Capacity::Reflexive => (Horizon::P30D, Cadence::Weekly),
        Capacity::Anticipatory => (Horizon::P60D, Cadence::Weekly),
        Capacity::Deliberative => (Horizon::P60D, Cadence::Bimonthly),
        Capacity::Structural => {
            if intense {
                (Horizon::P180D, Cadence::Quarterly)
            } else {
                (Horizon::P90D, Cadence::Monthly)
            }
        }
    };
    SrtSuggestion { horizon, cadence }
}

/// Guardrails for primaries that act directly on the loop
pub fn guardrail_hint(primary: Capacity) -> Option<GuardrailHint> {
    let (cap, timebox_days) = match primary {
        Capacity::Responsive => ("limit discretionary actuation", 14),
        Capacity::Reflexive => ("respect controller caps", 30),
        Capacity::Structural => ("no irreversible commitments pre-review", 90),
        Capacity::Deliberative | Capacity::Anticipatory => return None,
    };
    Some(GuardrailHint {
        caps: vec![cap.to_string()],
        timebox_days,
    })
}

/// Disclosure level suggested by the legitimacy gap
pub fn classify_consent(legitimacy_gap: f64) -> ConsentInfo {
    let transparency = if legitimacy_gap >= LEGITIMACY_PACK_THRESHOLD {
        Transparency::Pack
    } else if legitimacy_gap >= LEGITIMACY_BANNER_THRESHOLD {
        Transparency::Banner
    } else {
        Transparency::None
    };
    ConsentInfo {
        leg_gap: legitimacy_gap,
        transparency,
    }
}

/// Audit line for human review logs
pub fn rationale(
    request: &DecisionRequest,
    signals: &NormalizedSignals,
    scores: &CapacityScores,
    picked: &[Capacity],
) -> String {
    let mut line = format!(
        "loop={} indicator={} at={} | severity={:.2} trend={:.2} ews={:.2} legitimacy={:.2} | primary={} ({:.2})",
        request.loop_code,
        request.indicator,
        request.tstamp,
        signals.severity,
        signals.trend_slope,
        signals.early_warning_prob,
        signals.legitimacy_gap,
        picked[0],
        scores.get(picked[0]),
    );
    if let Some(&secondary) = picked.get(1) {
        line.push_str(&format!(
            " secondary={} ({:.2})",
            secondary,
            scores.get(secondary)
        ));
    }
    line
}
