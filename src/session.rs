use crate::catalog::{ActionVocabulary, Catalog, ParameterOption};
use crate::config::EngineConfig;
use crate::document::{self, Algorithm};
use crate::error::{DocumentError, SessionError, ValidationRejection};
use crate::gateway::{self, Assignment, ItemKind};
use crate::rules::{Mutation, Outcome, RulesEngine, ValueEdit};
use crate::storage::{AlgorithmRepository, ResourceStore, StoredAlgorithm};
use crate::tree::{ActionKind, Forest, IdGenerator, Operator, validate_forest};
use itertools::Itertools;
use tracing::{debug, info, warn};

/// One in-progress algorithm: its metadata, bound template and forest.
///
/// All edits go through the rules engine; a rejected edit leaves the session
/// exactly as it was.
pub struct BuilderSession {
    catalog: Catalog,
    config: EngineConfig,
    rules: RulesEngine,
    ids: Box<dyn IdGenerator>,
    name: String,
    description: String,
    template: Option<String>,
    forest: Forest,
}

pub struct BuilderSessionBuilder {
    catalog: Catalog,
    config: EngineConfig,
    ids: Option<Box<dyn IdGenerator>>,
}

impl BuilderSessionBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: EngineConfig::default(),
            ids: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the generator selected by the config's `id_strategy`.
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> BuilderSession {
        let ids = self
            .ids
            .unwrap_or_else(|| self.config.id_strategy.generator());
        BuilderSession {
            catalog: self.catalog,
            rules: RulesEngine::new(self.config.operator_profile),
            config: self.config,
            ids,
            name: String::new(),
            description: String::new(),
            template: None,
            forest: Forest::new(),
        }
    }
}

impl BuilderSession {
    pub fn builder(catalog: Catalog) -> BuilderSessionBuilder {
        BuilderSessionBuilder::new(catalog)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parameters addressable under the bound template.
    pub fn parameters(&self) -> Vec<ParameterOption> {
        self.catalog.parameters(self.template())
    }

    /// Actions available under the bound template.
    pub fn actions(&self) -> ActionVocabulary {
        self.catalog.actions(self.template())
    }

    /// Binds a template and starts over with a single empty root.
    ///
    /// An empty code unbinds the template and clears the forest.
    pub fn select_template(&mut self, code: &str) {
        self.forest = Forest::new();
        if code.is_empty() {
            self.template = None;
            return;
        }
        self.template = Some(code.to_string());
        let root_id = self.forest.append_root(self.ids.as_mut());
        debug!(template = code, root_id = %root_id, "template selected");
    }

    /// Appends an empty root condition.
    pub fn add_root(&mut self) -> Result<String, ValidationRejection> {
        if self.template.is_none() {
            return Err(ValidationRejection::NoTemplate);
        }
        Ok(self.forest.append_root(self.ids.as_mut()))
    }

    /// Validates and applies a single mutation.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Outcome, ValidationRejection> {
        self.rules
            .apply(&mut self.forest, self.ids.as_mut(), mutation)
    }

    pub fn set_parameter(
        &mut self,
        node_id: &str,
        parameter: impl Into<String>,
    ) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::SetParameter {
            node_id: node_id.to_string(),
            parameter: parameter.into(),
        })
    }

    pub fn set_operator(
        &mut self,
        node_id: &str,
        operator: Operator,
    ) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::SetOperator {
            node_id: node_id.to_string(),
            operator,
        })
    }

    pub fn set_value(
        &mut self,
        node_id: &str,
        edit: ValueEdit,
    ) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::SetValue {
            node_id: node_id.to_string(),
            edit,
        })
    }

    pub fn add_action(
        &mut self,
        node_id: &str,
        kind: ActionKind,
        action: impl Into<String>,
    ) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::AddAction {
            node_id: node_id.to_string(),
            kind,
            action: action.into(),
        })
    }

    pub fn remove_action(
        &mut self,
        node_id: &str,
        kind: ActionKind,
        action: &str,
    ) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::RemoveAction {
            node_id: node_id.to_string(),
            kind,
            action: action.to_string(),
        })
    }

    /// "Add condition": appends an empty child below `parent_id`.
    pub fn add_condition(&mut self, parent_id: &str) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::AddChild {
            parent_id: parent_id.to_string(),
            parameter: None,
        })
    }

    pub fn remove_node(&mut self, node_id: &str) -> Result<Outcome, ValidationRejection> {
        self.apply(Mutation::RemoveNode {
            node_id: node_id.to_string(),
        })
    }

    /// Handles a drag-and-drop assignment.
    ///
    /// Drops that do not match a drop zone, or that carry values the catalog
    /// does not offer under the current config, come back as `Outcome::Ignored`.
    pub fn drop_item(&mut self, assignment: &Assignment) -> Result<Outcome, ValidationRejection> {
        let Some(mutation) = gateway::route(assignment) else {
            debug!(target_id = %assignment.target_id, zone = ?assignment.zone, "drop ignored");
            return Ok(Outcome::Ignored);
        };
        if !self.accepts(assignment) {
            debug!(value = %assignment.item.value, "drop ignored: not offered by the catalog");
            return Ok(Outcome::Ignored);
        }
        self.apply(mutation)
    }

    fn accepts(&self, assignment: &Assignment) -> bool {
        let item = &assignment.item;
        match (item.kind, item.action_kind) {
            (ItemKind::Parameter, _) => {
                !self.config.strict_catalog
                    || self.catalog.contains_parameter(self.template(), &item.value)
            }
            (ItemKind::Action, Some(kind)) => {
                let vocabulary = self.actions();
                let offered = vocabulary.of(kind);
                if offered.is_placeholder && !self.config.allow_placeholder_actions {
                    return false;
                }
                !self.config.strict_catalog || offered.contains(&item.value)
            }
            (ItemKind::Action, None) => false,
        }
    }

    /// Snapshot of the session as an algorithm, if it is complete enough to keep.
    pub fn algorithm(&self) -> Result<Algorithm, ValidationRejection> {
        let template = match self.template.as_deref() {
            Some(code) if !self.name.trim().is_empty() && !self.forest.is_empty() => code,
            _ => {
                return Err(ValidationRejection::IncompleteAlgorithm(
                    "fill in the name, select a template and create at least one condition"
                        .to_string(),
                ));
            }
        };
        Ok(
            Algorithm::new(self.name.clone(), template, self.forest.clone())
                .with_description(self.description.clone()),
        )
    }

    /// Exported document and the file name it should be saved under.
    pub fn export(&self) -> Result<(String, String), SessionError> {
        let algorithm = self.algorithm()?;
        let json = document::export(&algorithm)?;
        let file_name = algorithm.file_name();
        info!(file_name = %file_name, nodes = algorithm.tree.node_count(), "exported algorithm");
        Ok((file_name, json))
    }

    /// Replaces the whole session with an imported document.
    ///
    /// On error nothing changes.
    pub fn import(&mut self, json: &str) -> Result<(), SessionError> {
        let algorithm = document::import(json)?;
        self.check_profile(&algorithm)?;
        self.replace_with(algorithm);
        Ok(())
    }

    /// Stores the algorithm and resets the session for the next one.
    pub fn save<S: ResourceStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<StoredAlgorithm, SessionError> {
        let algorithm = self.algorithm()?;
        let stored = AlgorithmRepository::new(store).create(&algorithm)?;
        self.clear();
        Ok(stored)
    }

    /// Replaces the session with a stored algorithm.
    pub fn load<S: ResourceStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &str,
    ) -> Result<(), SessionError> {
        let stored = AlgorithmRepository::new(store).get(id)?;
        self.check_profile(&stored.algorithm)?;
        self.replace_with(stored.algorithm);
        Ok(())
    }

    /// Resets name, description, template and forest.
    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
        self.template = None;
        self.forest = Forest::new();
    }

    /// Rejects trees using operators the session's profile does not allow.
    fn check_profile(&self, algorithm: &Algorithm) -> Result<(), DocumentError> {
        let violations = validate_forest(&algorithm.tree, self.config.operator_profile);
        if violations.is_empty() {
            return Ok(());
        }
        warn!(
            name = %algorithm.name,
            profile = %self.config.operator_profile,
            violations = violations.len(),
            "algorithm rejected by operator profile"
        );
        Err(DocumentError::InvariantViolation(
            violations.iter().join("; "),
        ))
    }

    fn replace_with(&mut self, algorithm: Algorithm) {
        for id in algorithm.tree.ids() {
            self.ids.reserve(id);
        }
        info!(
            name = %algorithm.name,
            roots = algorithm.tree.roots().len(),
            "session replaced"
        );
        self.name = algorithm.name;
        self.description = algorithm.description;
        self.template = Some(algorithm.template).filter(|code| !code.is_empty());
        self.forest = algorithm.tree;
    }
}
