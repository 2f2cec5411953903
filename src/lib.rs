//! # medtree - Medical Decision-Tree Construction Engine
//!
//! **medtree** builds and validates medical decision trees: hierarchies of
//! conditions over laboratory parameters, where each condition may trigger
//! intermediate *process* actions and/or terminal *result* actions. It keeps the
//! tree well-formed while it is edited one node and one field at a time, and
//! converts it to and from the portable JSON document the algorithm store uses.
//!
//! Evaluating a tree against patient results is out of scope; this crate only
//! builds and exports trees.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Catalog**: Collect the templates and global parameters (e.g. via
//!     [`storage::load_catalog`]) into a [`catalog::Catalog`].
//! 2.  **Open a Session**: Use `BuilderSession::builder` to create an editing
//!     session, optionally with an `EngineConfig` and a custom id generator.
//! 3.  **Edit**: Select a template, then edit nodes directly or route drag-and-drop
//!     assignments through the session. Every edit is checked by the rules engine
//!     before it touches the forest.
//! 4.  **Persist**: Export the algorithm to a file or save it through a
//!     [`storage::ResourceStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medtree::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = Catalog::new(vec![], vec![]);
//!     let mut session = BuilderSession::builder(catalog).build();
//!
//!     // Binding a template creates the first root condition.
//!     session.select_template("CBC");
//!     session.set_name("Glucose follow-up");
//!     let root_id = session.forest().roots()[0].id.clone();
//!
//!     session.set_parameter(&root_id, "glucose")?;
//!     session.set_value(&root_id, ValueEdit::Scalar("120".to_string()))?;
//!
//!     // Dropping a parameter on the children zone creates a child condition.
//!     let drop = Assignment::new(DraggedItem::parameter("age"), &root_id, DropZone::Children);
//!     let Outcome::Created(child_id) = session.drop_item(&drop)? else {
//!         unreachable!("the root is not terminal");
//!     };
//!
//!     // A result action closes the branch.
//!     session.add_action(&child_id, ActionKind::Result, "VALIDATE")?;
//!     assert!(session.add_condition(&child_id).is_err());
//!
//!     let (file_name, json) = session.export()?;
//!     std::fs::write(file_name, json)?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod prelude;
pub mod rules;
pub mod session;
pub mod storage;
pub mod tree;
