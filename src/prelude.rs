//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the medtree
//! crate. Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use medtree::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let algorithm = medtree::document::from_file("path/to/glucose_algorithm.json")?;
//! println!("{}", OutlineFormatter::format_forest(&algorithm.tree));
//!
//! let violations = validate_forest(&algorithm.tree, OperatorProfile::Persisted);
//! println!("{} violation(s)", violations.len());
//! # Ok(())
//! # }
//! ```

// Editing
pub use crate::gateway::{Assignment, DraggedItem, DropZone, ItemKind};
pub use crate::rules::{Mutation, Outcome, RulesEngine, ValueEdit};
pub use crate::session::BuilderSession;

// Tree model
pub use crate::tree::{
    ActionKind, ClinicalState, ConditionNode, ConditionValue, Forest, IdGenerator, Operator,
    OutlineFormatter, RangeValue, validate_forest,
};

// Catalog, documents and storage
pub use crate::catalog::{Catalog, GlobalParameter, Template};
pub use crate::config::{EngineConfig, OperatorProfile};
pub use crate::document::{Algorithm, export, import};
pub use crate::storage::{MemoryStore, ResourceKind, ResourceStore};

// Error types
pub use crate::error::{DocumentError, SessionError, StorageError, ValidationRejection};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
