//! Signal normalization and band-relative severity
//!
//! Everything here is total: NaN, infinities, out-of-range inputs and
//! degenerate bands all resolve to a value in [0,1].

use crate::types::{BandContext, NormalizedSignals, SignalInputs};

/// Clamp to [0,1]; NaN maps to 0
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Missing signals are silent zeros
pub fn safe(x: Option<f64>) -> f64 {
    clamp01(x.unwrap_or(0.0))
}

/// Distance outside the band, in band widths, clamped to [0,1]
///
/// A value one full band width beyond either edge saturates at 1.
pub fn severity(value: f64, band: &BandContext) -> f64 {
    if band.is_degenerate() {
        return 0.0;
    }
    let span = band.span();
    if value > band.upper {
        clamp01((value - band.upper) / span)
    } else if value < band.lower {
        clamp01((band.lower - value) / span)
    } else {
        0.0
    }
}

/// Default, clamp and derive every signal the scorer reads
pub fn normalize(reading: &SignalInputs) -> NormalizedSignals {
    NormalizedSignals {
        severity: severity(reading.value, &reading.band),
        trend_slope: safe(reading.trend_slope),
        persistence_fraction: safe(reading.persistence_fraction),
        integral_error: safe(reading.integral_error),
        oscillation: safe(reading.oscillation),
        dispersion: safe(reading.dispersion),
        hub_saturation: safe(reading.hub_saturation),
        early_warning_prob: safe(reading.early_warning_prob),
        // No buffer reading is no evidence of a thin buffer
        inverse_buffer: reading
            .buffer_adequacy
            .map(|b| 1.0 - clamp01(b))
            .unwrap_or(0.0),
        data_quality_penalty: safe(reading.data_quality_penalty),
        legitimacy_gap: safe(reading.legitimacy_gap),
        guardrail_violation: safe(reading.guardrail_violation),
        relative_controller_error: safe(reading.relative_controller_error),
        lead_time_weight: safe(reading.lead_time_weight),
    }
}
