//! Common test utilities for building catalogs, sessions and algorithm documents.
use medtree::catalog::{TemplateAction, TemplateParameter};
use medtree::prelude::*;
use medtree::tree::SequentialIds;
use serde_json::json;

/// Biochemistry template with two parameters and one action of each kind.
#[allow(dead_code)]
pub fn biochemistry_template() -> Template {
    Template {
        name: "Biochemistry".to_string(),
        code: "BIO".to_string(),
        parameters: vec![
            TemplateParameter {
                name: "glucose".to_string(),
                sub_parameters: vec![],
                states: vec!["supra".to_string(), "normal".to_string()],
                default_range: RangeValue::new("70", "110"),
            },
            TemplateParameter {
                name: "creatinine".to_string(),
                sub_parameters: vec![],
                states: vec![],
                default_range: RangeValue::default(),
            },
        ],
        actions: vec![
            TemplateAction {
                name: "RERUN_TEST".to_string(),
                kind: ActionKind::Process,
                parameters: vec![],
            },
            TemplateAction {
                name: "VALIDATE".to_string(),
                kind: ActionKind::Result,
                parameters: vec![],
            },
        ],
        description: "Routine chemistry panel".to_string(),
    }
}

/// A template that defines neither parameters nor actions.
#[allow(dead_code)]
pub fn bare_template() -> Template {
    Template {
        name: "Bare".to_string(),
        code: "BARE".to_string(),
        parameters: vec![],
        actions: vec![],
        description: String::new(),
    }
}

/// `age` is active, `legacy_flag` has been retired.
#[allow(dead_code)]
pub fn sample_globals() -> Vec<GlobalParameter> {
    serde_json::from_value(json!([
        { "name": "age", "label": "Age", "type": "number", "isRequired": true },
        { "name": "legacy_flag", "type": "boolean", "isActive": false }
    ]))
    .unwrap()
}

#[allow(dead_code)]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![biochemistry_template(), bare_template()], sample_globals())
}

/// A session over the sample catalog with the default config.
#[allow(dead_code)]
pub fn session() -> BuilderSession {
    BuilderSession::builder(sample_catalog()).build()
}

/// A session over the sample catalog with a custom config and `node-<n>` ids.
#[allow(dead_code)]
pub fn session_with(config: EngineConfig) -> BuilderSession {
    BuilderSession::builder(sample_catalog())
        .with_config(config)
        .with_id_generator(Box::new(SequentialIds::new()))
        .build()
}

/// Two-root algorithm document as the store returns it.
///
/// `root-1`: glucose > 126, rerun, then a terminal child on age.
/// `root-2`: glucose in range 70..110, validated.
#[allow(dead_code)]
pub fn sample_document() -> serde_json::Value {
    json!({
        "_id": "0000000000000000000000a1",
        "isActive": true,
        "name": "Glucose follow-up",
        "template": "BIO",
        "description": "Flags hyperglycaemia",
        "version": "1.0",
        "tree": [
            {
                "id": "root-1",
                "type": "condition",
                "parameter": "glucose.result",
                "operator": "greater_than",
                "value": "126",
                "processActions": ["RERUN_TEST"],
                "resultActions": [],
                "children": [
                    {
                        "id": "root-1-child-0",
                        "type": "condition",
                        "parameter": "age",
                        "operator": "greater_than",
                        "value": "65",
                        "processActions": [],
                        "resultActions": ["VALIDATE"],
                        "children": []
                    }
                ]
            },
            {
                "id": "root-2",
                "type": "condition",
                "parameter": "glucose.result",
                "operator": "range",
                "value": { "min": "70", "max": "110" },
                "processActions": [],
                "resultActions": ["VALIDATE"],
                "children": []
            }
        ]
    })
}

#[allow(dead_code)]
pub fn sample_document_json() -> String {
    serde_json::to_string(&sample_document()).unwrap()
}
