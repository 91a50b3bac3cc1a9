//! Ranking, near-tie composition, consent override and ordering
//!
//! Rules, in order:
//! - rank by score, ties in canonical capacity order
//! - second capacity joins when within `near_tie_delta` of the top
//! - legitimacy gap ≥ 0.35 without life-safety forces deliberative into
//!   the second slot, displacing any near-tie pick
//! - anticipatory sequences before responsive when both are picked

use std::cmp::Ordering;

use tracing::info;

use crate::types::{Capacity, CapacityScores};
use crate::LEGITIMACY_PACK_THRESHOLD;

/// Outcome of the ranking stage
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// All five capacities, best first
    pub ranked: Vec<(Capacity, f64)>,
    /// One or two capacities, primary first
    pub picked: Vec<Capacity>,
    /// Consent override forced deliberative into the pick
    pub consent_override: bool,
    /// Near-tie capacity the override displaced, if any
    pub displaced: Option<Capacity>,
}

impl Composition {
    pub fn primary(&self) -> Capacity {
        self.picked[0]
    }
}

/// Descending by score; the stable sort keeps canonical order on ties
pub fn rank(scores: &CapacityScores) -> Vec<(Capacity, f64)> {
    let mut ranked = scores.pairs().to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Pick the primary, an optional near-tie second, then apply the consent override
pub fn compose(
    scores: &CapacityScores,
    near_tie_delta: f64,
    legitimacy_gap: f64,
    life_safety: bool,
) -> Composition {
    let ranked = rank(scores);
    let (top, top_score) = ranked[0];
    let mut picked = vec![top];

    if let Some(&(second, second_score)) = ranked.get(1) {
        if second_score >= top_score - near_tie_delta {
            picked.push(second);
        }
    }

    let mut displaced = None;
    let consent_override = !life_safety
        && legitimacy_gap >= LEGITIMACY_PACK_THRESHOLD
        && !picked.contains(&Capacity::Deliberative);
    if consent_override {
        displaced = picked.get(1).copied();
        picked = vec![picked[0], Capacity::Deliberative];
        info!(
            legitimacy_gap,
            primary = %picked[0],
            displaced = ?displaced,
            "consent override forced deliberative"
        );
    }

    Composition {
        ranked,
        picked,
        consent_override,
        displaced,
    }
}

/// Execution order for the picked capacities
pub fn order(picked: &[Capacity]) -> Vec<Capacity> {
    let has_anticipatory = picked.contains(&Capacity::Anticipatory);
    let has_responsive = picked.contains(&Capacity::Responsive);

    if has_anticipatory && has_responsive {
        let mut ordered = vec![Capacity::Anticipatory, Capacity::Responsive];
        ordered.extend(
            picked
                .iter()
                .filter(|c| !matches!(c, Capacity::Anticipatory | Capacity::Responsive))
                .copied(),
        );
        ordered
    } else {
        picked.to_vec()
    }
}
