//! Conversion between an in-memory [`Algorithm`] and its portable JSON document.
//!
//! The same document shape is used for file export/import and as the storage
//! payload. Import is all-or-nothing: it either yields a complete, well-formed
//! algorithm or an error, never a partially decoded one.

use crate::error::DocumentError;
use crate::tree::Forest;
use std::fs;
use std::path::Path;
use tracing::info;

pub mod conversion;
pub mod wire;

pub use conversion::*;
pub use wire::*;

/// One decision-tree algorithm with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Algorithm {
    pub name: String,
    /// Code of the template the tree was built against. Not checked against any catalog.
    pub template: String,
    pub tree: Forest,
    pub description: String,
    pub version: String,
}

impl Algorithm {
    pub fn new(name: impl Into<String>, template: impl Into<String>, tree: Forest) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            tree,
            description: String::new(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn to_document(&self) -> AlgorithmDocument {
        AlgorithmDocument::from(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, DocumentError> {
        serde_json::to_value(self.to_document())
            .map_err(|e| DocumentError::JsonParseError(e.to_string()))
    }

    /// Decodes an algorithm from an already-parsed JSON value, e.g. a stored resource.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        require_fields(&value)?;
        let document: AlgorithmDocument = serde_json::from_value(value)
            .map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
        document.into_algorithm()
    }

    pub fn file_name(&self) -> String {
        export_file_name(&self.name)
    }
}

const REQUIRED_FIELDS: [&str; 3] = ["name", "template", "tree"];

fn require_fields(value: &serde_json::Value) -> Result<(), DocumentError> {
    let object = value.as_object().ok_or_else(|| {
        DocumentError::JsonParseError("expected a JSON object at the top level".to_string())
    })?;
    match REQUIRED_FIELDS
        .into_iter()
        .find(|field| !object.contains_key(*field))
    {
        Some(missing) => Err(DocumentError::MissingField(missing)),
        None => Ok(()),
    }
}

/// Renders the canonical, 2-space indented document for `algorithm`.
pub fn export(algorithm: &Algorithm) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(&algorithm.to_document())
        .map_err(|e| DocumentError::JsonParseError(e.to_string()))
}

/// Parses a document produced by [`export`], by the algorithm store, or by an
/// older single-root exporter.
pub fn import(document: &str) -> Result<Algorithm, DocumentError> {
    let value: serde_json::Value =
        serde_json::from_str(document).map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
    let algorithm = Algorithm::from_json_value(value)?;
    info!(
        name = %algorithm.name,
        template = %algorithm.template,
        nodes = algorithm.tree.node_count(),
        "imported algorithm document"
    );
    Ok(algorithm)
}

/// File name an algorithm is exported under: lowercase, every character outside
/// `[a-z0-9]` replaced by `_`, suffixed `_algorithm.json`.
pub fn export_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_algorithm.json", stem)
}

/// Writes the exported document to `path`.
pub fn save_to_file(algorithm: &Algorithm, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let json = export(algorithm)?;
    fs::write(path, json).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "exported algorithm document");
    Ok(())
}

/// Reads and imports a document from `path`.
pub fn from_file(path: impl AsRef<Path>) -> Result<Algorithm, DocumentError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    import(&content)
}
