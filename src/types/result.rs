//! Decision output structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::types::{Capacity, SprintLevel};

/// Normalized score per capacity, each in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityScores {
    pub responsive: f64,
    pub reflexive: f64,
    pub deliberative: f64,
    pub anticipatory: f64,
    pub structural: f64,
}

impl CapacityScores {
    pub fn get(&self, capacity: Capacity) -> f64 {
        match capacity {
            Capacity::Responsive => self.responsive,
            Capacity::Reflexive => self.reflexive,
            Capacity::Deliberative => self.deliberative,
            Capacity::Anticipatory => self.anticipatory,
            Capacity::Structural => self.structural,
        }
    }

    /// Scores paired with their capacity, in canonical order
    pub fn pairs(&self) -> [(Capacity, f64); 5] {
        Capacity::ALL.map(|c| (c, self.get(c)))
    }

    pub fn max(&self) -> f64 {
        self.pairs()
            .iter()
            .map(|(_, s)| *s)
            .fold(0.0, f64::max)
    }
}

/// Review horizon as an ISO-8601 period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    P14D,
    P30D,
    P60D,
    P90D,
    P180D,
}

impl Horizon {
    pub fn days(&self) -> u32 {
        match self {
            Horizon::P14D => 14,
            Horizon::P30D => 30,
            Horizon::P60D => 60,
            Horizon::P90D => 90,
            Horizon::P180D => 180,
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}D", self.days())
    }
}

/// Review frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Bimonthly,
    Monthly,
    Quarterly,
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Bimonthly => "bimonthly",
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
        };
        write!(f, "{}", name)
    }
}

/// Suggested review horizon and cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrtSuggestion {
    pub horizon: Horizon,
    pub cadence: Cadence,
}

/// Guardrails to attach to the primary capacity's mandate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailHint {
    pub caps: Vec<String>,
    pub timebox_days: u32,
}

/// Suggested disclosure level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    None,
    Banner,
    Pack,
}

impl std::fmt::Display for Transparency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transparency::None => "none",
            Transparency::Banner => "banner",
            Transparency::Pack => "pack",
        };
        write!(f, "{}", name)
    }
}

/// Consent metadata reported on every result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentInfo {
    pub leg_gap: f64,
    pub transparency: Transparency,
}

/// Templated next steps for one recommended capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityAction {
    pub capacity: Capacity,
    /// 1-based position in the recommendation
    pub order: usize,
    pub actions: Vec<String>,
    pub sprint_level: SprintLevel,
}

/// Full engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub scores: CapacityScores,
    /// One or two capacities, primary first
    pub recommended_capacities: Vec<Capacity>,
    /// Execution sequence; a permutation of `recommended_capacities`
    pub order: Vec<Capacity>,
    pub srt: SrtSuggestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrails: Option<GuardrailHint>,
    pub consent: ConsentInfo,
    pub rationale: String,
    pub template_actions: Vec<CapacityAction>,
}

impl DecisionResult {
    /// First recommended capacity; `None` only for a result read back
    /// from elsewhere with an empty list
    pub fn primary(&self) -> Option<Capacity> {
        self.recommended_capacities.first().copied()
    }

    pub fn secondary(&self) -> Option<Capacity> {
        self.recommended_capacities.get(1).copied()
    }

    pub fn is_composed(&self) -> bool {
        self.recommended_capacities.len() > 1
    }

    pub fn recommends(&self, capacity: Capacity) -> bool {
        self.recommended_capacities.contains(&capacity)
    }

    /// SHA-256 over the canonical JSON encoding, lowercase hex
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Single line for logs (no colors)
    pub fn to_parseable_string(&self) -> String {
        let recommended: Vec<&str> = self.recommended_capacities.iter().map(|c| c.name()).collect();
        let order: Vec<&str> = self.order.iter().map(|c| c.name()).collect();
        format!(
            "primary={} | recommended={} | order={} | horizon={} | cadence={} | transparency={}",
            self.primary().map_or("none", |c| c.name()),
            recommended.join(","),
            order.join(">"),
            self.srt.horizon,
            self.srt.cadence,
            self.consent.transparency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> DecisionResult {
        DecisionResult {
            scores: CapacityScores::default(),
            recommended_capacities: Vec::new(),
            order: Vec::new(),
            srt: SrtSuggestion {
                horizon: Horizon::P30D,
                cadence: Cadence::Weekly,
            },
            guardrails: None,
            consent: ConsentInfo {
                leg_gap: 0.0,
                transparency: Transparency::None,
            },
            rationale: String::new(),
            template_actions: Vec::new(),
        }
    }

    #[test]
    fn test_empty_recommendation_has_no_primary() {
        let result = empty_result();
        assert_eq!(result.primary(), None);
        assert_eq!(result.secondary(), None);
        assert!(result
            .to_parseable_string()
            .starts_with("primary=none | recommended= |"));
    }

    #[test]
    fn test_fingerprint_is_lowercase_hex() {
        let fingerprint = empty_result().fingerprint().unwrap();
        assert_eq!(fingerprint.len(), 64);
        assert!(fingerprint
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
