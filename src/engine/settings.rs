//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::entity::EntityValue;
use crate::error::NluError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    /// Slot value that defers to remembered context (e.g. "it")
    pub placeholder: Option<EntityValue>,
    /// Carry remembered slots into turns that don't mention them. Default: true
    pub carry_context: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            placeholder: None,
            carry_context: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, NluError> {
        serde_json::from_str(json).map_err(|e| NluError::Config(e.to_string()))
    }
}
