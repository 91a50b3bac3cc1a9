//! Capacity Decision Engine
//!
//! Turns a noisy indicator reading into a ranked recommendation of which
//! governance capacity should act, in what order, over what review horizon.
//!
//! Pipeline: signals → severity → per-capacity scores → composition → metadata

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{compute_capacity_decision, CapacityEngine};
pub use crate::error::{EngineError, Result};

// =============================================================================
// POLICY DEFAULTS
// =============================================================================

/// Informational primary threshold (accepted, not gating)
pub const DEFAULT_PRIMARY_CUTOFF: f64 = 0.7;

/// Second capacity joins the pick when within this distance of the top score
pub const DEFAULT_NEAR_TIE_DELTA: f64 = 0.1;

// =============================================================================
// CONSENT THRESHOLDS
// =============================================================================

/// Legitimacy gap at which deliberative consultation is forced and a
/// full disclosure pack is suggested
pub const LEGITIMACY_PACK_THRESHOLD: f64 = 0.35;

/// Legitimacy gap at which a disclosure banner is suggested
pub const LEGITIMACY_BANNER_THRESHOLD: f64 = 0.2;

// =============================================================================
// SRT
// =============================================================================

/// Top score at or above which a decision counts as intense
pub const INTENSE_SCORE_THRESHOLD: f64 = 0.8;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
