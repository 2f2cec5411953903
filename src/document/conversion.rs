use super::wire::{AlgorithmDocument, CONDITION_TYPE, NodeDocument, TreeField, WireValue};
use super::Algorithm;
use crate::config::OperatorProfile;
use crate::error::DocumentError;
use crate::tree::{
    ClinicalState, ConditionNode, ConditionValue, Forest, Operator, ValueShape, validate_forest,
};
use itertools::Itertools;
use tracing::warn;

/// A source format that can be turned into an [`Algorithm`].
///
/// The JSON document is the built-in implementation; hosts with their own
/// persisted shape implement this to reuse the import checks.
pub trait IntoAlgorithm {
    /// Consumes the object and converts it into a well-formed algorithm.
    fn into_algorithm(self) -> Result<Algorithm, DocumentError>;
}

impl IntoAlgorithm for AlgorithmDocument {
    fn into_algorithm(self) -> Result<Algorithm, DocumentError> {
        let roots = self
            .tree
            .into_roots()
            .into_iter()
            .map(ConditionNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let tree = Forest::from_roots(roots);

        let violations = validate_forest(&tree, OperatorProfile::Full);
        if !violations.is_empty() {
            return Err(DocumentError::InvariantViolation(
                violations.iter().join("; "),
            ));
        }

        Ok(Algorithm {
            name: self.name,
            template: self.template,
            tree,
            description: self.description,
            version: self.version,
        })
    }
}

impl TryFrom<NodeDocument> for ConditionNode {
    type Error = DocumentError;

    fn try_from(doc: NodeDocument) -> Result<Self, Self::Error> {
        if doc.node_type != CONDITION_TYPE {
            return Err(DocumentError::InvalidNode {
                node_id: doc.id,
                message: format!("unsupported node type '{}'", doc.node_type),
            });
        }

        let value = decode_value(&doc.id, doc.operator, doc.value);
        let children = doc
            .children
            .into_iter()
            .map(ConditionNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConditionNode {
            id: doc.id,
            parameter: doc.parameter,
            operator: doc.operator,
            value,
            process_actions: doc.process_actions,
            result_actions: doc.result_actions,
            children,
        })
    }
}

/// Maps a wire value onto the shape its operator expects.
///
/// Values left behind by an earlier operator are replaced by the operator's
/// empty value instead of failing the whole document.
fn decode_value(node_id: &str, operator: Operator, value: WireValue) -> ConditionValue {
    match (operator.value_shape(), value) {
        (ValueShape::Scalar, WireValue::Text(s)) => ConditionValue::Scalar(s),
        (ValueShape::Scalar, WireValue::Other(serde_json::Value::Number(n))) => {
            ConditionValue::Scalar(n.to_string())
        }
        (ValueShape::Range, WireValue::Range(range)) => ConditionValue::Range(range),
        (ValueShape::State, WireValue::Text(s)) if s.is_empty() => ConditionValue::State(None),
        (ValueShape::State, WireValue::Text(s)) => match s.parse::<ClinicalState>() {
            Ok(state) => ConditionValue::State(Some(state)),
            Err(_) => {
                warn!(node_id, value = %s, "dropping unknown state value");
                ConditionValue::State(None)
            }
        },
        (ValueShape::Absent, WireValue::Text(s)) if s.is_empty() => ConditionValue::Absent,
        (_, WireValue::Other(serde_json::Value::Null)) => ConditionValue::empty_for(operator),
        (_, stale) => {
            warn!(node_id, %operator, ?stale, "resetting value that does not fit its operator");
            ConditionValue::empty_for(operator)
        }
    }
}

impl From<&ConditionNode> for NodeDocument {
    fn from(node: &ConditionNode) -> Self {
        let value = match &node.value {
            ConditionValue::Scalar(s) => WireValue::Text(s.clone()),
            ConditionValue::Range(range) => WireValue::Range(range.clone()),
            ConditionValue::State(Some(state)) => WireValue::Text(state.to_string()),
            ConditionValue::State(None) | ConditionValue::Absent => WireValue::default(),
        };

        NodeDocument {
            id: node.id.clone(),
            node_type: CONDITION_TYPE.to_string(),
            parameter: node.parameter.clone(),
            operator: node.operator,
            value,
            process_actions: node.process_actions.clone(),
            result_actions: node.result_actions.clone(),
            children: node.children.iter().map(NodeDocument::from).collect(),
        }
    }
}

impl From<&Algorithm> for AlgorithmDocument {
    fn from(algorithm: &Algorithm) -> Self {
        AlgorithmDocument {
            name: algorithm.name.clone(),
            template: algorithm.template.clone(),
            tree: TreeField::Forest(
                algorithm
                    .tree
                    .roots()
                    .iter()
                    .map(NodeDocument::from)
                    .collect(),
            ),
            description: algorithm.description.clone(),
            version: algorithm.version.clone(),
        }
    }
}
