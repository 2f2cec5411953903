//! Tests for the forest store: lookup, insertion, removal and traversal.
mod common;
use medtree::prelude::*;
use medtree::tree::{ChildIndexIds, SequentialIds, Violation};

fn two_level_forest() -> Forest {
    let mut root = ConditionNode::new("root-1").with_parameter("glucose.result");
    let mut child = ConditionNode::new("root-1-child-0").with_parameter("age");
    child
        .children
        .push(ConditionNode::new("root-1-child-0-child-0"));
    root.children.push(child);
    root.children.push(ConditionNode::new("root-1-child-1"));
    Forest::from_roots(vec![root, ConditionNode::new("root-2")])
}

#[test]
fn test_find_searches_every_root_depth_first() {
    let forest = two_level_forest();
    assert_eq!(
        forest.find("root-1-child-0-child-0").map(|n| n.id.as_str()),
        Some("root-1-child-0-child-0")
    );
    assert!(forest.find("root-2").is_some());
    assert!(forest.find("missing").is_none());
}

#[test]
fn test_find_and_transform_misses_leave_forest_untouched() {
    let mut forest = two_level_forest();
    let before = forest.clone();
    let result = forest.find_and_transform("missing", |node| node.parameter.clear());
    assert!(result.is_none());
    assert_eq!(forest, before);

    let result = forest.find_and_transform("root-1-child-1", |node| {
        node.parameter = "creatinine.result".to_string();
        node.id.clone()
    });
    assert_eq!(result.as_deref(), Some("root-1-child-1"));
    assert_eq!(
        forest.find("root-1-child-1").unwrap().parameter,
        "creatinine.result"
    );
}

#[test]
fn test_remove_by_id_takes_the_whole_subtree() {
    let mut forest = two_level_forest();
    let removed = forest.remove_by_id("root-1-child-0").unwrap();
    assert_eq!(removed.children.len(), 1);
    assert!(!forest.contains("root-1-child-0"));
    assert!(!forest.contains("root-1-child-0-child-0"));
    assert!(forest.contains("root-1-child-1"));
    assert_eq!(forest.node_count(), 3);
}

#[test]
fn test_remove_root_is_allowed() {
    let mut forest = two_level_forest();
    assert!(forest.remove_by_id("root-1").is_some());
    assert_eq!(forest.roots().len(), 1);
    assert_eq!(forest.roots()[0].id, "root-2");
    assert!(forest.remove_by_id("root-1").is_none());
}

#[test]
fn test_append_child_uses_child_index_ids() {
    let mut forest = two_level_forest();
    let mut ids = ChildIndexIds::new();
    for id in two_level_forest().ids() {
        ids.reserve(id);
    }

    let id = forest
        .append_child("root-2", "age", &mut ids)
        .unwrap()
        .unwrap();
    assert_eq!(id, "root-2-child-0");
    let child = forest.find(&id).unwrap();
    assert_eq!(child.parameter, "age");
    assert_eq!(child.operator, Operator::Equals);
    assert!(child.children.is_empty());
}

#[test]
fn test_append_child_never_reuses_an_id_after_removal() {
    let mut forest = Forest::new();
    let mut ids = ChildIndexIds::new();
    let root = forest.append_root(&mut ids);
    let first = forest.append_child(&root, "", &mut ids).unwrap().unwrap();
    let second = forest.append_child(&root, "", &mut ids).unwrap().unwrap();
    assert_eq!(first, "root-1-child-0");
    assert_eq!(second, "root-1-child-1");

    // The parent is back to one child, so the index would collide with `second`.
    forest.remove_by_id(&first);
    let third = forest.append_child(&root, "", &mut ids).unwrap().unwrap();
    assert_ne!(third, second);
    assert_ne!(third, first);

    let violations = validate_forest(&forest, OperatorProfile::Full);
    assert!(violations.is_empty());
}

#[test]
fn test_append_child_skips_ids_already_in_the_forest() {
    // A generator that knows nothing about the forest's existing ids.
    let mut forest = Forest::from_roots(vec![ConditionNode::new("node-1")]);
    let mut ids = SequentialIds::new();
    let id = forest.append_child("node-1", "", &mut ids).unwrap().unwrap();
    assert_eq!(id, "node-2");
}

#[test]
fn test_append_child_rejects_terminal_parent() {
    let mut forest = two_level_forest();
    forest
        .find_mut("root-2")
        .unwrap()
        .result_actions
        .push("VALIDATE".to_string());

    let result = forest.append_child("root-2", "age", &mut SequentialIds::starting_at(100));
    assert_eq!(
        result,
        Err(ValidationRejection::TerminalNode {
            node_id: "root-2".to_string()
        })
    );
    assert!(forest.find("root-2").unwrap().children.is_empty());
}

#[test]
fn test_append_child_lookup_miss_is_not_an_error() {
    let mut forest = two_level_forest();
    let result = forest.append_child("missing", "age", &mut SequentialIds::new());
    assert_eq!(result, Ok(None));
    assert_eq!(forest, two_level_forest());
}

#[test]
fn test_walk_is_pre_order_with_depths() {
    let forest = two_level_forest();
    let visited: Vec<(usize, &str)> = forest
        .walk()
        .map(|(depth, node)| (depth, node.id.as_str()))
        .collect();
    assert_eq!(
        visited,
        vec![
            (0, "root-1"),
            (1, "root-1-child-0"),
            (2, "root-1-child-0-child-0"),
            (1, "root-1-child-1"),
            (0, "root-2"),
        ]
    );
    assert_eq!(forest.depth(), 3);
    assert_eq!(Forest::new().depth(), 0);
}

#[test]
fn test_validate_forest_reports_each_violation() {
    let mut terminal = ConditionNode::new("a");
    terminal.result_actions = vec!["VALIDATE".to_string()];
    terminal.children.push(ConditionNode::new("b"));
    terminal.process_actions = vec!["RERUN_TEST".to_string(), "RERUN_TEST".to_string()];
    let mut state = ConditionNode::new("b");
    state.operator = Operator::State;
    state.value = ConditionValue::State(Some(ClinicalState::Supra));

    let forest = Forest::from_roots(vec![terminal, state]);
    let violations = validate_forest(&forest, OperatorProfile::Persisted);

    assert!(violations.contains(&Violation::DuplicateId("b".to_string())));
    assert!(violations.contains(&Violation::TerminalWithChildren {
        node_id: "a".to_string(),
        children: 1
    }));
    assert!(violations.contains(&Violation::DuplicateAction {
        node_id: "a".to_string(),
        kind: ActionKind::Process,
        action: "RERUN_TEST".to_string()
    }));
    assert!(violations.contains(&Violation::OperatorNotAllowed {
        node_id: "b".to_string(),
        operator: Operator::State,
        profile: OperatorProfile::Persisted
    }));
    assert_eq!(violations.len(), 4);

    // The full profile accepts `state`.
    assert_eq!(validate_forest(&forest, OperatorProfile::Full).len(), 3);
}

#[test]
fn test_outline_formatter() {
    let mut root = ConditionNode::new("root-1").with_parameter("glucose.result");
    root.operator = Operator::Range;
    root.value = ConditionValue::Range(RangeValue::new("70", "110"));
    root.process_actions = vec!["RERUN_TEST".to_string()];
    let mut child = ConditionNode::new("root-1-child-0");
    child.value = ConditionValue::Scalar("65".to_string());
    child.result_actions = vec!["VALIDATE".to_string(), "CALL_EXPERT".to_string()];
    root.children.push(child);

    let outline = OutlineFormatter::format_forest(&Forest::from_roots(vec![root]));
    let expected = "[root-1] glucose.result range [70 .. 110] + RERUN_TEST\n  [root-1-child-0] <unset> equals \"65\" => VALIDATE, CALL_EXPERT (terminal)";
    assert_eq!(outline, expected);
}

#[test]
fn test_condition_value_reshape() {
    let scalar = ConditionValue::Scalar("5".to_string());
    assert_eq!(
        scalar.clone().reshape_for(Operator::LessThan),
        ConditionValue::Scalar("5".to_string())
    );
    assert_eq!(
        scalar.reshape_for(Operator::Range),
        ConditionValue::Range(RangeValue::default())
    );
    assert_eq!(
        ConditionValue::empty_for(Operator::Default),
        ConditionValue::Absent
    );
    assert_eq!(
        ConditionValue::empty_for(Operator::State),
        ConditionValue::State(None)
    );
    assert!(ConditionValue::Range(RangeValue::new("", "")).is_empty());
}

#[test]
fn test_clinical_state_parsing() {
    assert_eq!("extra".parse::<ClinicalState>(), Ok(ClinicalState::Extra));
    assert_eq!(
        "high".parse::<ClinicalState>(),
        Err(ValidationRejection::UnknownState("high".to_string()))
    );
}
