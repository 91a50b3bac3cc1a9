//! Core types for the capacity engine

mod capacity;
mod config;
mod request;
mod result;
mod signals;

pub use capacity::{Capacity, SprintLevel};
pub use config::{
    AnticipatoryWeights, CapacityWeights, ConfigOverrides, DecisionConfig, DeliberativeWeights,
    ReflexiveWeights, ResponsiveWeights, StructuralWeights, WeightOverrides,
};
pub use request::{DecisionContext, DecisionRequest};
pub use result::{
    Cadence, CapacityAction, CapacityScores, ConsentInfo, DecisionResult, GuardrailHint, Horizon,
    SrtSuggestion, Transparency,
};
pub use signals::{BandContext, NormalizedSignals, SignalInputs};
