//! Core modules for the capacity engine

pub mod batch;
pub mod composer;
pub mod engine;
pub mod metadata;
pub mod scoring;
pub mod severity;
pub mod templates;

pub use batch::{evaluate_lines, BatchSummary};
pub use composer::Composition;
pub use engine::{compute_capacity_decision, CapacityEngine, DecisionTrace};
pub use scoring::CapacityScorer;
pub use severity::{clamp01, normalize, safe, severity};
