use crate::tree::{Operator, RangeValue};
use serde::{Deserialize, Serialize};

/// Version written into newly exported documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Persisted algorithm, as stored and as exported to file.
///
/// Unknown top-level keys (store bookkeeping such as `_id` or `isActive`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDocument {
    pub name: String,
    pub template: String,
    pub tree: TreeField,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// The `tree` key: a list of roots, or a single root in legacy documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeField {
    Forest(Vec<NodeDocument>),
    Single(Box<NodeDocument>),
}

impl TreeField {
    /// Upgrades a legacy single root to a one-element list.
    pub fn into_roots(self) -> Vec<NodeDocument> {
        match self {
            TreeField::Forest(roots) => roots,
            TreeField::Single(root) => vec![*root],
        }
    }
}

/// Wire shape of a condition node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
    pub id: String,
    #[serde(rename = "type", default = "condition_type")]
    pub node_type: String,
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: WireValue,
    #[serde(default)]
    pub process_actions: Vec<String>,
    #[serde(default)]
    pub result_actions: Vec<String>,
    #[serde(default)]
    pub children: Vec<NodeDocument>,
}

pub(crate) const CONDITION_TYPE: &str = "condition";

fn condition_type() -> String {
    CONDITION_TYPE.to_string()
}

/// Wire shape of a node value.
///
/// `Other` absorbs whatever older documents stored under the untyped value
/// column (numbers, `null`, malformed ranges).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Text(String),
    Range(RangeValue),
    Other(serde_json::Value),
}

impl Default for WireValue {
    fn default() -> Self {
        WireValue::Text(String::new())
    }
}
