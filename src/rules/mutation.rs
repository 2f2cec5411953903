use crate::tree::{ActionKind, Operator, RangeValue};

/// A single edit requested against the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetParameter {
        node_id: String,
        parameter: String,
    },
    SetOperator {
        node_id: String,
        operator: Operator,
    },
    SetValue {
        node_id: String,
        edit: ValueEdit,
    },
    AddAction {
        node_id: String,
        kind: ActionKind,
        action: String,
    },
    RemoveAction {
        node_id: String,
        kind: ActionKind,
        action: String,
    },
    /// "Add condition" (no parameter) or a parameter dropped on the children zone.
    AddChild {
        parent_id: String,
        parameter: Option<String>,
    },
    RemoveNode {
        node_id: String,
    },
}

impl Mutation {
    /// The node the mutation addresses.
    pub fn target(&self) -> &str {
        match self {
            Mutation::SetParameter { node_id, .. }
            | Mutation::SetOperator { node_id, .. }
            | Mutation::SetValue { node_id, .. }
            | Mutation::AddAction { node_id, .. }
            | Mutation::RemoveAction { node_id, .. }
            | Mutation::RemoveNode { node_id } => node_id,
            Mutation::AddChild { parent_id, .. } => parent_id,
        }
    }
}

/// An edit of a node's value field.
///
/// `RangeMin` and `RangeMax` touch one half of a range and keep the other.
/// `State` carries the raw state name; an empty string unselects the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueEdit {
    Scalar(String),
    Range(RangeValue),
    RangeMin(String),
    RangeMax(String),
    State(String),
    Clear,
}

/// What an accepted mutation did to the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A child or root was created with this id.
    Created(String),
    /// Nothing to do, e.g. the action was already present.
    Unchanged,
    /// The target id is not in the forest.
    NotFound,
    /// The assignment did not match any accepted drop combination.
    Ignored,
}

impl Outcome {
    pub fn changed_tree(&self) -> bool {
        matches!(self, Outcome::Applied | Outcome::Created(_))
    }
}
