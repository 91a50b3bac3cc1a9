//! Decision request as supplied by callers

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{ConfigOverrides, SignalInputs};

/// Situational context that can veto the consent override
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_safety: Option<bool>,
}

impl DecisionContext {
    pub fn life_safety() -> Self {
        Self {
            life_safety: Some(true),
        }
    }
}

/// One call into the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    /// Opaque loop identifier, echoed into the rationale
    pub loop_code: String,
    /// Opaque indicator identifier
    pub indicator: String,
    /// Caller-supplied audit timestamp, echoed as given (empty when omitted)
    #[serde(default)]
    pub tstamp: String,
    pub reading: SignalInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<DecisionContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigOverrides>,
}

impl DecisionRequest {
    pub fn new(
        loop_code: impl Into<String>,
        indicator: impl Into<String>,
        tstamp: impl Into<String>,
        reading: SignalInputs,
    ) -> Self {
        Self {
            loop_code: loop_code.into(),
            indicator: indicator.into(),
            tstamp: tstamp.into(),
            reading,
            context: None,
            config: None,
        }
    }

    pub fn with_context(mut self, context: DecisionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_config(mut self, config: ConfigOverrides) -> Self {
        self.config = Some(config);
        self
    }

    /// True only when the caller explicitly flagged life safety
    pub fn is_life_safety(&self) -> bool {
        self.context
            .and_then(|c| c.life_safety)
            .unwrap_or(false)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
