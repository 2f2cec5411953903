use crate::config::OperatorProfile;
use crate::storage::ResourceKind;
use crate::tree::{Operator, ValueShape};
use thiserror::Error;

/// A requested edit would break a structural rule of the tree.
///
/// The tree is left untouched whenever one of these is returned, and the message
/// is written to be shown to the operator as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationRejection {
    #[error(
        "Cannot add child conditions to node '{node_id}': it has result actions, and result actions are terminal"
    )]
    TerminalNode { node_id: String },

    #[error(
        "Cannot add a result action to node '{node_id}': it already has child conditions, and result actions are terminal"
    )]
    TerminalWithChildren { node_id: String },

    #[error("Node '{node_id}' uses operator '{operator}', which does not accept a {found} value")]
    ValueShapeMismatch {
        node_id: String,
        operator: Operator,
        found: ValueShape,
    },

    #[error("'{0}' is not a known state (expected supra, normal or extra)")]
    UnknownState(String),

    #[error("Operator '{operator}' is not available in the '{profile}' operator profile")]
    OperatorNotAllowed {
        operator: Operator,
        profile: OperatorProfile,
    },

    #[error("Please select a template first")]
    NoTemplate,

    #[error("Algorithm is incomplete: {0}")]
    IncompleteAlgorithm(String),
}

/// Errors raised while reading or writing an algorithm document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Failed to parse algorithm JSON: {0}")]
    JsonParseError(String),

    #[error("Algorithm document is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Node '{node_id}' is invalid: {message}")]
    InvalidNode { node_id: String, message: String },

    #[error("Algorithm tree is not well-formed: {0}")]
    InvariantViolation(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors reported by the storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{kind} request failed: {message}")]
    RequestFailed { kind: ResourceKind, message: String },

    #[error("{kind} response carried no data")]
    EmptyResponse { kind: ResourceKind },

    #[error("Stored {kind} resource could not be decoded: {message}")]
    Decode { kind: ResourceKind, message: String },
}

/// Errors raised while loading an `EngineConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),
}

/// Any failure surfaced by a `BuilderSession` workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] ValidationRejection),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
