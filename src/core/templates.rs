//! Hand-authored follow-up actions per capacity

use crate::types::{Capacity, CapacityAction};

/// Three next steps per capacity
fn actions_for(capacity: Capacity) -> [&'static str; 3] {
    match capacity {
        Capacity::Responsive => [
            "Stabilize the indicator back inside its tolerance band",
            "Draw on buffers and limit discretionary actuation",
            "Log each intervention and check the outcome at the next daily review",
        ],
        Capacity::Reflexive => [
            "Review controller gains and damping against observed oscillation",
            "Audit recent guardrail violations and restore controller caps",
            "Recalibrate the controller error model and record the change",
        ],
        Capacity::Deliberative => [
            "Convene affected stakeholders for a structured consultation",
            "Publish the evidence pack and the open trade-offs",
            "Agree a shared-resource allocation and document consent",
        ],
        Capacity::Anticipatory => [
            "Confirm the early-warning signal against an independent source",
            "Prepare contingency actions sized to the available lead time",
            "Set trigger thresholds that hand off to responsive action",
        ],
        Capacity::Structural => [
            "Commission a root-cause review of the persistent breach",
            "Remediate data-quality gaps feeding the indicator",
            "Draft a redesign proposal with no irreversible commitments before review",
        ],
    }
}

/// One action block per picked capacity, numbered from 1
pub fn template_actions(picked: &[Capacity]) -> Vec<CapacityAction> {
    picked
        .iter()
        .enumerate()
        .map(|(i, &capacity)| CapacityAction {
            capacity,
            order: i + 1,
            actions: actions_for(capacity).iter().map(|a| a.to_string()).collect(),
            sprint_level: capacity.sprint_level(),
        })
        .collect()
}
