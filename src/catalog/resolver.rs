use super::global::GlobalParameter;
use super::template::Template;
use crate::tree::ActionKind;
use serde::Serialize;

/// Facets every template parameter is addressable by, as `<parameter>.<facet>`.
pub const PARAMETER_FACETS: [&str; 5] = ["result", "qc", "unit", "last_value", "last_test"];

/// Process actions offered when a template defines none.
pub const FALLBACK_PROCESS_ACTIONS: [&str; 2] = ["CHANGE_RESULT_STATUS", "RERUN_TEST"];

/// Result actions offered when a template defines none.
pub const FALLBACK_RESULT_ACTIONS: [&str; 3] =
    ["VALIDATE", "CALL_EXPERT", "CONDITIONAL_VALIDATION"];

/// One entry of the parameter picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterOption {
    pub value: String,
    pub label: String,
}

/// The action names available for one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
    pub names: Vec<String>,
    /// Set when `names` is the fallback vocabulary rather than the template's own.
    pub is_placeholder: bool,
}

impl ActionSet {
    fn fallback(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            is_placeholder: true,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionVocabulary {
    pub process: ActionSet,
    pub result: ActionSet,
}

impl ActionVocabulary {
    pub fn of(&self, kind: ActionKind) -> &ActionSet {
        match kind {
            ActionKind::Process => &self.process,
            ActionKind::Result => &self.result,
        }
    }
}

/// Lists the addressable parameters: template facets first, then global parameters.
pub fn list_parameters(
    template: Option<&Template>,
    globals: &[GlobalParameter],
) -> Vec<ParameterOption> {
    let template_options = template
        .into_iter()
        .flat_map(|template| template.parameters.iter())
        .flat_map(|parameter| {
            PARAMETER_FACETS.iter().map(move |facet| ParameterOption {
                value: format!("{}.{}", parameter.name, facet),
                label: format!("{} - {}", parameter.name, facet),
            })
        });

    let global_options = globals
        .iter()
        .filter(|global| global.is_active)
        .map(|global| ParameterOption {
            value: global.name.clone(),
            label: global.name.clone(),
        });

    template_options.chain(global_options).collect()
}

/// Splits the template's actions by kind, falling back per kind when it has none.
pub fn list_actions(template: Option<&Template>) -> ActionVocabulary {
    let resolve = |kind: ActionKind, fallback: &[&str]| {
        let names: Vec<String> = template
            .into_iter()
            .flat_map(|template| template.actions_of(kind))
            .map(|action| action.name.clone())
            .collect();
        if names.is_empty() {
            ActionSet::fallback(fallback)
        } else {
            ActionSet {
                names,
                is_placeholder: false,
            }
        }
    };

    ActionVocabulary {
        process: resolve(ActionKind::Process, &FALLBACK_PROCESS_ACTIONS),
        result: resolve(ActionKind::Result, &FALLBACK_RESULT_ACTIONS),
    }
}

/// Read-only templates and global parameters available to a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub templates: Vec<Template>,
    pub globals: Vec<GlobalParameter>,
}

impl Catalog {
    pub fn new(templates: Vec<Template>, globals: Vec<GlobalParameter>) -> Self {
        Self { templates, globals }
    }

    /// Resolves a template code. Unknown codes resolve to `None`.
    pub fn find_template(&self, code: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.code == code)
    }

    pub fn parameters(&self, template_code: Option<&str>) -> Vec<ParameterOption> {
        let template = template_code.and_then(|code| self.find_template(code));
        list_parameters(template, &self.globals)
    }

    pub fn actions(&self, template_code: Option<&str>) -> ActionVocabulary {
        list_actions(template_code.and_then(|code| self.find_template(code)))
    }

    pub fn contains_parameter(&self, template_code: Option<&str>, value: &str) -> bool {
        self.parameters(template_code)
            .iter()
            .any(|option| option.value == value)
    }
}
