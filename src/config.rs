use crate::error::ConfigError;
use crate::tree::{IdStrategy, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// The operator set a deployment accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorProfile {
    /// All seven operators the builder offers.
    #[default]
    Full,
    /// The five operators the algorithm store's schema accepts.
    Persisted,
}

impl OperatorProfile {
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            OperatorProfile::Full => &Operator::ALL,
            OperatorProfile::Persisted => &[
                Operator::Equals,
                Operator::Range,
                Operator::Contains,
                Operator::GreaterThan,
                Operator::LessThan,
            ],
        }
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }
}

impl fmt::Display for OperatorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorProfile::Full => f.write_str("full"),
            OperatorProfile::Persisted => f.write_str("persisted"),
        }
    }
}

/// Engine settings for one editing session.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub operator_profile: OperatorProfile,
    /// Ignore dropped parameters and actions that the resolved catalog does not list.
    pub strict_catalog: bool,
    /// Accept the fallback action vocabulary offered for templates without actions.
    pub allow_placeholder_actions: bool,
    pub id_strategy: IdStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            operator_profile: OperatorProfile::Full,
            strict_catalog: false,
            allow_placeholder_actions: true,
            id_strategy: IdStrategy::ChildIndex,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
