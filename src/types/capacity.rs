//! Governance capacities and intervention depth

use colored::Color;
use serde::{Deserialize, Serialize};

/// The five operating modes a governance loop can act through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    /// Fast stabilization of a reading outside its band
    Responsive,
    /// Tuning of the controller itself (oscillation, cap violations)
    Reflexive,
    /// Consultation across stakeholders and shared resources
    Deliberative,
    /// Acting on early-warning evidence before the breach
    Anticipatory,
    /// Redesign for persistent, accumulated error
    Structural,
}

impl Capacity {
    /// Canonical enumeration order. Equal scores resolve in this order.
    pub const ALL: [Capacity; 5] = [
        Capacity::Responsive,
        Capacity::Reflexive,
        Capacity::Deliberative,
        Capacity::Anticipatory,
        Capacity::Structural,
    ];

    /// Lowercase wire name
    pub fn name(&self) -> &'static str {
        match self {
            Capacity::Responsive => "responsive",
            Capacity::Reflexive => "reflexive",
            Capacity::Deliberative => "deliberative",
            Capacity::Anticipatory => "anticipatory",
            Capacity::Structural => "structural",
        }
    }

    /// Intervention depth of the templated follow-up
    pub fn sprint_level(&self) -> SprintLevel {
        match self {
            Capacity::Responsive | Capacity::Reflexive => SprintLevel::P,
            Capacity::Deliberative | Capacity::Anticipatory => SprintLevel::N,
            Capacity::Structural => SprintLevel::S,
        }
    }

    /// Terminal badge color
    pub fn color(&self) -> Color {
        match self {
            Capacity::Responsive => Color::Red,
            Capacity::Reflexive => Color::Yellow,
            Capacity::Deliberative => Color::Cyan,
            Capacity::Anticipatory => Color::Magenta,
            Capacity::Structural => Color::Blue,
        }
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Depth of an intervention: Narrative, Policy or Structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SprintLevel {
    N,
    P,
    S,
}

impl SprintLevel {
    pub fn description(&self) -> &'static str {
        match self {
            SprintLevel::N => "Narrative",
            SprintLevel::P => "Policy",
            SprintLevel::S => "Structure",
        }
    }
}

impl std::fmt::Display for SprintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            SprintLevel::N => "N",
            SprintLevel::P => "P",
            SprintLevel::S => "S",
        };
        write!(f, "{}", code)
    }
}
