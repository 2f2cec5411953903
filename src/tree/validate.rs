use super::forest::Forest;
use super::node::{ActionKind, Operator};
use crate::config::OperatorProfile;
use itertools::Itertools;
use thiserror::Error;

/// A structural problem found in a whole forest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("node id '{0}' is used more than once")]
    DuplicateId(String),

    #[error("node '{node_id}' has result actions but also {children} child condition(s)")]
    TerminalWithChildren { node_id: String, children: usize },

    #[error("node '{node_id}' lists {kind} action '{action}' more than once")]
    DuplicateAction {
        node_id: String,
        kind: ActionKind,
        action: String,
    },

    #[error("node '{node_id}' uses operator '{operator}', which the '{profile}' profile does not allow")]
    OperatorNotAllowed {
        node_id: String,
        operator: Operator,
        profile: OperatorProfile,
    },
}

/// Checks every node of `forest` against the tree invariants.
///
/// An empty result means the forest is well-formed.
pub fn validate_forest(forest: &Forest, profile: OperatorProfile) -> Vec<Violation> {
    let mut violations: Vec<Violation> = forest
        .ids()
        .duplicates()
        .map(|id| Violation::DuplicateId(id.to_string()))
        .collect();

    for node in forest.iter() {
        if node.is_terminal() && !node.children.is_empty() {
            violations.push(Violation::TerminalWithChildren {
                node_id: node.id.clone(),
                children: node.children.len(),
            });
        }

        for kind in [ActionKind::Process, ActionKind::Result] {
            violations.extend(node.actions(kind).iter().duplicates().map(|action| {
                Violation::DuplicateAction {
                    node_id: node.id.clone(),
                    kind,
                    action: action.clone(),
                }
            }));
        }

        if !profile.allows(node.operator) {
            violations.push(Violation::OperatorNotAllowed {
                node_id: node.id.clone(),
                operator: node.operator,
                profile,
            });
        }
    }

    violations
}
