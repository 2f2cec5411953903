//! The storage collaborator, seen through a generic resource interface.
//!
//! Resources are opaque JSON documents keyed by a store-assigned `_id`. Every
//! call answers with an [`Envelope`], mirroring the `{success, data|error}`
//! responses of the algorithm service.

use crate::catalog::{Catalog, GlobalParameter, Template};
use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod algorithms;
pub mod memory;

pub use algorithms::*;
pub use memory::*;

/// Key under which stores place the resource id.
pub const ID_FIELD: &str = "_id";

/// Key stores use for soft deletion.
pub const ACTIVE_FIELD: &str = "isActive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Algorithms,
    Templates,
    GlobalParameters,
    Actions,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Algorithms => "algorithms",
            ResourceKind::Templates => "templates",
            ResourceKind::GlobalParameters => "global-parameters",
            ResourceKind::Actions => "actions",
        }
    }

    /// Singular, capitalised name used in error messages ("Algorithm not found").
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Algorithms => "Algorithm",
            ResourceKind::Templates => "Template",
            ResourceKind::GlobalParameters => "Global parameter",
            ResourceKind::Actions => "Action",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// `{success, data|error}` response of a storage call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self, kind: ResourceKind) -> Result<T, StorageError> {
        if !self.success {
            return Err(StorageError::RequestFailed {
                kind,
                message: self
                    .error
                    .unwrap_or_else(|| "An error occurred".to_string()),
            });
        }
        self.data.ok_or(StorageError::EmptyResponse { kind })
    }
}

/// Generic CRUD access to stored resources.
pub trait ResourceStore {
    /// Active resources of `kind`, newest first.
    fn list(&self, kind: ResourceKind) -> Envelope<Vec<Value>>;

    fn get(&self, kind: ResourceKind, id: &str) -> Envelope<Value>;

    fn create(&mut self, kind: ResourceKind, body: Value) -> Envelope<Value>;

    /// Overwrites the fields present in `body`, keeping the others.
    fn update(&mut self, kind: ResourceKind, id: &str, body: Value) -> Envelope<Value>;

    /// Soft-deletes the resource and returns it.
    fn delete(&mut self, kind: ResourceKind, id: &str) -> Envelope<Value>;
}

/// Reads the resource id a store assigned.
pub fn resource_id(resource: &Value) -> Option<&str> {
    resource.get(ID_FIELD).and_then(Value::as_str)
}

fn decode_all<T: DeserializeOwned>(
    kind: ResourceKind,
    resources: Vec<Value>,
) -> Result<Vec<T>, StorageError> {
    resources
        .into_iter()
        .map(|resource| {
            serde_json::from_value(resource).map_err(|e| StorageError::Decode {
                kind,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Loads the active templates and global parameters into a [`Catalog`].
pub fn load_catalog(store: &dyn ResourceStore) -> Result<Catalog, StorageError> {
    let templates: Vec<Template> = decode_all(
        ResourceKind::Templates,
        store
            .list(ResourceKind::Templates)
            .into_result(ResourceKind::Templates)?,
    )?;
    let globals: Vec<GlobalParameter> = decode_all(
        ResourceKind::GlobalParameters,
        store
            .list(ResourceKind::GlobalParameters)
            .into_result(ResourceKind::GlobalParameters)?,
    )?;
    Ok(Catalog::new(templates, globals))
}
