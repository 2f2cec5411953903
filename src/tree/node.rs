use super::value::{ConditionValue, ValueShape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison a condition applies to its parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[default]
    Equals,
    Range,
    Contains,
    GreaterThan,
    LessThan,
    Default,
    State,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Equals,
        Operator::Range,
        Operator::Contains,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Default,
        Operator::State,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Range => "range",
            Operator::Contains => "contains",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Default => "default",
            Operator::State => "state",
        }
    }

    pub fn value_shape(&self) -> ValueShape {
        match self {
            Operator::Equals | Operator::Contains | Operator::GreaterThan | Operator::LessThan => {
                ValueShape::Scalar
            }
            Operator::Range => ValueShape::Range,
            Operator::State => ValueShape::State,
            Operator::Default => ValueShape::Absent,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of a node's two action lists an action belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Runs without ending the branch.
    #[default]
    Process,
    /// Ends the branch.
    Result,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Process => f.write_str("process"),
            ActionKind::Result => f.write_str("result"),
        }
    }
}

/// A single condition in the decision tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionNode {
    pub id: String,
    /// Addressable parameter value; empty while unset.
    pub parameter: String,
    pub operator: Operator,
    pub value: ConditionValue,
    pub process_actions: Vec<String>,
    pub result_actions: Vec<String>,
    pub children: Vec<ConditionNode>,
}

impl ConditionNode {
    /// Creates an empty `equals` condition with no parameter, actions or children.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameter: String::new(),
            operator: Operator::Equals,
            value: ConditionValue::empty_for(Operator::Equals),
            process_actions: Vec::new(),
            result_actions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = parameter.into();
        self
    }

    /// A node carrying a result action closes its branch.
    pub fn is_terminal(&self) -> bool {
        !self.result_actions.is_empty()
    }

    pub fn actions(&self, kind: ActionKind) -> &[String] {
        match kind {
            ActionKind::Process => &self.process_actions,
            ActionKind::Result => &self.result_actions,
        }
    }

    pub(crate) fn actions_mut(&mut self, kind: ActionKind) -> &mut Vec<String> {
        match kind {
            ActionKind::Process => &mut self.process_actions,
            ActionKind::Result => &mut self.result_actions,
        }
    }

    /// Depth-first search of this node and its descendants.
    pub fn find(&self, id: &str) -> Option<&ConditionNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ConditionNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Detaches the descendant with `id`, taking its whole subtree with it.
    pub(crate) fn remove_descendant(&mut self, id: &str) -> Option<ConditionNode> {
        if let Some(pos) = self.children.iter().position(|child| child.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }
}
