use super::node::Operator;
use crate::error::ValidationRejection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The enumerated result states a `state` condition can test for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalState {
    Supra,
    Normal,
    Extra,
}

impl ClinicalState {
    pub const ALL: [ClinicalState; 3] = [
        ClinicalState::Supra,
        ClinicalState::Normal,
        ClinicalState::Extra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicalState::Supra => "supra",
            ClinicalState::Normal => "normal",
            ClinicalState::Extra => "extra",
        }
    }
}

impl fmt::Display for ClinicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClinicalState {
    type Err = ValidationRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClinicalState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationRejection::UnknownState(s.to_string()))
    }
}

/// Bounds of a `range` condition. Either half may be empty while the operator is
/// still filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeValue {
    #[serde(default)]
    pub min: String,
    #[serde(default)]
    pub max: String,
}

impl RangeValue {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// The kind of value an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Scalar,
    Range,
    State,
    Absent,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Scalar => "scalar",
            ValueShape::Range => "range",
            ValueShape::State => "state",
            ValueShape::Absent => "empty",
        };
        f.write_str(name)
    }
}

/// The value side of a condition, keyed by the node's operator.
///
/// `State(None)` is a state condition whose state has not been picked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    Scalar(String),
    Range(RangeValue),
    State(Option<ClinicalState>),
    Absent,
}

impl ConditionValue {
    /// The value a freshly selected operator starts with.
    pub fn empty_for(operator: Operator) -> Self {
        match operator.value_shape() {
            ValueShape::Scalar => ConditionValue::Scalar(String::new()),
            ValueShape::Range => ConditionValue::Range(RangeValue::default()),
            ValueShape::State => ConditionValue::State(None),
            ValueShape::Absent => ConditionValue::Absent,
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            ConditionValue::Scalar(_) => ValueShape::Scalar,
            ConditionValue::Range(_) => ValueShape::Range,
            ConditionValue::State(_) => ValueShape::State,
            ConditionValue::Absent => ValueShape::Absent,
        }
    }

    pub fn fits(&self, operator: Operator) -> bool {
        self.shape() == operator.value_shape()
    }

    /// Keeps the value if `operator` takes the same shape, otherwise starts over
    /// with that operator's empty value.
    pub fn reshape_for(self, operator: Operator) -> Self {
        if self.fits(operator) {
            self
        } else {
            ConditionValue::empty_for(operator)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ConditionValue::Scalar(s) => s.is_empty(),
            ConditionValue::Range(r) => r.min.is_empty() && r.max.is_empty(),
            ConditionValue::State(state) => state.is_none(),
            ConditionValue::Absent => true,
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Scalar(s) => f.write_str(s),
            ConditionValue::Range(r) => write!(f, "{}..{}", r.min, r.max),
            ConditionValue::State(Some(state)) => write!(f, "{}", state),
            ConditionValue::State(None) | ConditionValue::Absent => Ok(()),
        }
    }
}
