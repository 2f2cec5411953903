use crate::tree::{ActionKind, RangeValue};
use serde::{Deserialize, Serialize};

/// A named parameter/action vocabulary that a tree is built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
    #[serde(default)]
    pub actions: Vec<TemplateAction>,
    #[serde(default)]
    pub description: String,
}

impl Template {
    pub fn actions_of(&self, kind: ActionKind) -> impl Iterator<Item = &TemplateAction> {
        self.actions.iter().filter(move |action| action.kind == kind)
    }
}

/// A laboratory parameter defined by a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParameter {
    pub name: String,
    #[serde(default)]
    pub sub_parameters: Vec<SubParameter>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub default_range: RangeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubParameter {
    pub name: String,
    #[serde(rename = "type", default = "default_sub_parameter_type")]
    pub data_type: String,
    #[serde(default)]
    pub default_value: String,
}

fn default_sub_parameter_type() -> String {
    "text".to_string()
}

/// An action a template makes available, with the list it belongs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateAction {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    #[serde(default)]
    pub parameters: Vec<String>,
}
