//! Validation of every edit before it reaches the forest.
//!
//! Each rule checks first and mutates second, so a rejected mutation never
//! leaves a partially applied edit behind.

use crate::config::OperatorProfile;
use crate::error::ValidationRejection;
use crate::tree::{
    ActionKind, ClinicalState, ConditionNode, ConditionValue, Forest, IdGenerator, Operator,
    RangeValue, ValueShape,
};
use tracing::{debug, warn};

mod mutation;

pub use mutation::*;

/// Applies mutations to a forest under the structural rules of the tree.
#[derive(Debug, Clone, Default)]
pub struct RulesEngine {
    profile: OperatorProfile,
}

impl RulesEngine {
    pub fn new(profile: OperatorProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> OperatorProfile {
        self.profile
    }

    /// Validates `mutation` and applies it to `forest`.
    ///
    /// Lookup misses are reported as `Outcome::NotFound` rather than as an error.
    pub fn apply(
        &self,
        forest: &mut Forest,
        ids: &mut dyn IdGenerator,
        mutation: Mutation,
    ) -> Result<Outcome, ValidationRejection> {
        let target = mutation.target().to_string();
        let result = self.dispatch(forest, ids, mutation);
        match &result {
            Ok(Outcome::NotFound) => debug!(node_id = %target, "mutation target not found"),
            Ok(outcome) => debug!(node_id = %target, ?outcome, "mutation accepted"),
            Err(rejection) => warn!(node_id = %target, %rejection, "mutation rejected"),
        }
        result
    }

    fn dispatch(
        &self,
        forest: &mut Forest,
        ids: &mut dyn IdGenerator,
        mutation: Mutation,
    ) -> Result<Outcome, ValidationRejection> {
        match mutation {
            Mutation::SetParameter { node_id, parameter } => edit(forest, &node_id, |node| {
                node.parameter = parameter;
                Ok(Outcome::Applied)
            }),
            Mutation::SetOperator { node_id, operator } => {
                if !self.profile.allows(operator) {
                    return Err(ValidationRejection::OperatorNotAllowed {
                        operator,
                        profile: self.profile,
                    });
                }
                edit(forest, &node_id, |node| {
                    set_operator(node, operator);
                    Ok(Outcome::Applied)
                })
            }
            Mutation::SetValue {
                node_id,
                edit: value_edit,
            } => edit(forest, &node_id, |node| set_value(node, value_edit)),
            Mutation::AddAction {
                node_id,
                kind,
                action,
            } => edit(forest, &node_id, |node| add_action(node, kind, action)),
            Mutation::RemoveAction {
                node_id,
                kind,
                action,
            } => edit(forest, &node_id, |node| Ok(remove_action(node, kind, &action))),
            Mutation::AddChild {
                parent_id,
                parameter,
            } => {
                let parameter = parameter.unwrap_or_default();
                Ok(forest
                    .append_child(&parent_id, &parameter, ids)?
                    .map_or(Outcome::NotFound, Outcome::Created))
            }
            Mutation::RemoveNode { node_id } => Ok(forest
                .remove_by_id(&node_id)
                .map_or(Outcome::NotFound, |_| Outcome::Applied)),
        }
    }
}

/// Runs a checked edit on one node, turning a lookup miss into `NotFound`.
fn edit<F>(forest: &mut Forest, node_id: &str, rule: F) -> Result<Outcome, ValidationRejection>
where
    F: FnOnce(&mut ConditionNode) -> Result<Outcome, ValidationRejection>,
{
    forest
        .find_and_transform(node_id, rule)
        .unwrap_or(Ok(Outcome::NotFound))
}

fn set_operator(node: &mut ConditionNode, operator: Operator) {
    let value = std::mem::replace(&mut node.value, ConditionValue::Absent);
    node.value = value.reshape_for(operator);
    node.operator = operator;
}

fn set_value(node: &mut ConditionNode, edit: ValueEdit) -> Result<Outcome, ValidationRejection> {
    let mismatch = |found: ValueShape| ValidationRejection::ValueShapeMismatch {
        node_id: node.id.clone(),
        operator: node.operator,
        found,
    };

    let value = match (node.operator.value_shape(), edit) {
        (_, ValueEdit::Clear) => ConditionValue::empty_for(node.operator),
        (ValueShape::Scalar, ValueEdit::Scalar(s)) => ConditionValue::Scalar(s),
        (ValueShape::Range, ValueEdit::Range(range)) => ConditionValue::Range(range),
        (ValueShape::Range, ValueEdit::RangeMin(min)) => ConditionValue::Range(RangeValue {
            min,
            max: current_range(&node.value).max,
        }),
        (ValueShape::Range, ValueEdit::RangeMax(max)) => ConditionValue::Range(RangeValue {
            min: current_range(&node.value).min,
            max,
        }),
        (ValueShape::State, ValueEdit::State(raw)) if raw.is_empty() => ConditionValue::State(None),
        (ValueShape::State, ValueEdit::State(raw)) => {
            ConditionValue::State(Some(raw.parse::<ClinicalState>()?))
        }
        (_, ValueEdit::Scalar(_)) => return Err(mismatch(ValueShape::Scalar)),
        (_, ValueEdit::Range(_) | ValueEdit::RangeMin(_) | ValueEdit::RangeMax(_)) => {
            return Err(mismatch(ValueShape::Range));
        }
        (_, ValueEdit::State(_)) => return Err(mismatch(ValueShape::State)),
    };

    node.value = value;
    Ok(Outcome::Applied)
}

fn current_range(value: &ConditionValue) -> RangeValue {
    match value {
        ConditionValue::Range(range) => range.clone(),
        _ => RangeValue::default(),
    }
}

fn add_action(
    node: &mut ConditionNode,
    kind: ActionKind,
    action: String,
) -> Result<Outcome, ValidationRejection> {
    if node.actions(kind).contains(&action) {
        return Ok(Outcome::Unchanged);
    }
    if kind == ActionKind::Result && !node.children.is_empty() {
        return Err(ValidationRejection::TerminalWithChildren {
            node_id: node.id.clone(),
        });
    }
    node.actions_mut(kind).push(action);
    Ok(Outcome::Applied)
}

fn remove_action(node: &mut ConditionNode, kind: ActionKind, action: &str) -> Outcome {
    let actions = node.actions_mut(kind);
    match actions.iter().position(|a| a == action) {
        Some(pos) => {
            actions.remove(pos);
            Outcome::Applied
        }
        None => Outcome::Unchanged,
    }
}
