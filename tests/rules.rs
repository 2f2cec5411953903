//! Tests for the rules engine: every mutation is checked before it is applied.
mod common;
use medtree::prelude::*;
use medtree::tree::{ChildIndexIds, IdGenerator, ValueShape};

struct Fixture {
    forest: Forest,
    ids: ChildIndexIds,
    rules: RulesEngine,
}

impl Fixture {
    fn new(profile: OperatorProfile) -> Self {
        let mut ids = ChildIndexIds::new();
        let mut forest = Forest::new();
        forest.append_root(&mut ids);
        Self {
            forest,
            ids,
            rules: RulesEngine::new(profile),
        }
    }

    fn apply(&mut self, mutation: Mutation) -> std::result::Result<Outcome, ValidationRejection> {
        let ids: &mut dyn IdGenerator = &mut self.ids;
        self.rules.apply(&mut self.forest, ids, mutation)
    }

    fn node(&self, id: &str) -> &ConditionNode {
        self.forest.find(id).unwrap()
    }
}

fn set_operator(node_id: &str, operator: Operator) -> Mutation {
    Mutation::SetOperator {
        node_id: node_id.to_string(),
        operator,
    }
}

fn set_value(node_id: &str, edit: ValueEdit) -> Mutation {
    Mutation::SetValue {
        node_id: node_id.to_string(),
        edit,
    }
}

fn add_action(node_id: &str, kind: ActionKind, action: &str) -> Mutation {
    Mutation::AddAction {
        node_id: node_id.to_string(),
        kind,
        action: action.to_string(),
    }
}

fn add_child(parent_id: &str) -> Mutation {
    Mutation::AddChild {
        parent_id: parent_id.to_string(),
        parameter: None,
    }
}

#[test]
fn test_result_action_makes_node_terminal() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    assert_eq!(
        fx.apply(add_action("root-1", ActionKind::Result, "VALIDATE")),
        Ok(Outcome::Applied)
    );
    assert!(fx.node("root-1").is_terminal());

    let before = fx.forest.clone();
    assert_eq!(
        fx.apply(add_child("root-1")),
        Err(ValidationRejection::TerminalNode {
            node_id: "root-1".to_string()
        })
    );
    assert_eq!(fx.forest, before);
}

#[test]
fn test_process_actions_do_not_close_the_branch() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(add_action("root-1", ActionKind::Process, "RERUN_TEST"))
        .unwrap();
    assert!(!fx.node("root-1").is_terminal());
    assert_eq!(
        fx.apply(add_child("root-1")),
        Ok(Outcome::Created("root-1-child-0".to_string()))
    );
}

#[test]
fn test_result_action_rejected_on_node_with_children() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(add_child("root-1")).unwrap();
    assert_eq!(
        fx.apply(add_action("root-1", ActionKind::Result, "VALIDATE")),
        Err(ValidationRejection::TerminalWithChildren {
            node_id: "root-1".to_string()
        })
    );
    assert!(fx.node("root-1").result_actions.is_empty());
}

#[test]
fn test_removing_last_result_action_reopens_the_branch() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(add_action("root-1", ActionKind::Result, "VALIDATE"))
        .unwrap();
    let removal = Mutation::RemoveAction {
        node_id: "root-1".to_string(),
        kind: ActionKind::Result,
        action: "VALIDATE".to_string(),
    };
    assert_eq!(fx.apply(removal.clone()), Ok(Outcome::Applied));
    assert_eq!(fx.apply(removal), Ok(Outcome::Unchanged));
    assert!(matches!(fx.apply(add_child("root-1")), Ok(Outcome::Created(_))));
}

#[test]
fn test_duplicate_actions_are_ignored() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(add_action("root-1", ActionKind::Process, "RERUN_TEST"))
        .unwrap();
    assert_eq!(
        fx.apply(add_action("root-1", ActionKind::Process, "RERUN_TEST")),
        Ok(Outcome::Unchanged)
    );
    assert_eq!(fx.node("root-1").process_actions, vec!["RERUN_TEST"]);

    // The same name in the other list is a different action.
    fx.apply(add_action("root-1", ActionKind::Result, "RERUN_TEST"))
        .unwrap();
    assert_eq!(fx.node("root-1").result_actions, vec!["RERUN_TEST"]);
}

#[test]
fn test_range_halves_are_edited_independently() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(set_operator("root-1", Operator::Range)).unwrap();
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::Range(RangeValue::default())
    );

    fx.apply(set_value("root-1", ValueEdit::RangeMin("70".to_string())))
        .unwrap();
    fx.apply(set_value("root-1", ValueEdit::RangeMax("110".to_string())))
        .unwrap();
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::Range(RangeValue::new("70", "110"))
    );

    fx.apply(set_value("root-1", ValueEdit::RangeMin("80".to_string())))
        .unwrap();
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::Range(RangeValue::new("80", "110"))
    );
}

#[test]
fn test_value_shape_must_match_operator() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    assert_eq!(
        fx.apply(set_value("root-1", ValueEdit::RangeMin("1".to_string()))),
        Err(ValidationRejection::ValueShapeMismatch {
            node_id: "root-1".to_string(),
            operator: Operator::Equals,
            found: ValueShape::Range,
        })
    );

    fx.apply(set_operator("root-1", Operator::Default)).unwrap();
    assert!(matches!(
        fx.apply(set_value("root-1", ValueEdit::Scalar("1".to_string()))),
        Err(ValidationRejection::ValueShapeMismatch { .. })
    ));
    assert_eq!(fx.node("root-1").value, ConditionValue::Absent);
}

#[test]
fn test_operator_change_keeps_compatible_values() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(set_value("root-1", ValueEdit::Scalar("126".to_string())))
        .unwrap();

    fx.apply(set_operator("root-1", Operator::GreaterThan))
        .unwrap();
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::Scalar("126".to_string())
    );

    fx.apply(set_operator("root-1", Operator::State)).unwrap();
    assert_eq!(fx.node("root-1").value, ConditionValue::State(None));
    assert_eq!(fx.node("root-1").operator, Operator::State);
}

#[test]
fn test_state_values() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(set_operator("root-1", Operator::State)).unwrap();

    fx.apply(set_value("root-1", ValueEdit::State("supra".to_string())))
        .unwrap();
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::State(Some(ClinicalState::Supra))
    );

    assert_eq!(
        fx.apply(set_value("root-1", ValueEdit::State("high".to_string()))),
        Err(ValidationRejection::UnknownState("high".to_string()))
    );
    assert_eq!(
        fx.node("root-1").value,
        ConditionValue::State(Some(ClinicalState::Supra))
    );

    fx.apply(set_value("root-1", ValueEdit::State(String::new())))
        .unwrap();
    assert_eq!(fx.node("root-1").value, ConditionValue::State(None));
}

#[test]
fn test_persisted_profile_rejects_extended_operators() {
    let mut fx = Fixture::new(OperatorProfile::Persisted);
    for operator in [Operator::Default, Operator::State] {
        assert_eq!(
            fx.apply(set_operator("root-1", operator)),
            Err(ValidationRejection::OperatorNotAllowed {
                operator,
                profile: OperatorProfile::Persisted,
            })
        );
    }
    assert_eq!(fx.node("root-1").operator, Operator::Equals);
    assert_eq!(
        fx.apply(set_operator("root-1", Operator::Contains)),
        Ok(Outcome::Applied)
    );
}

#[test]
fn test_unknown_targets_report_not_found() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    let before = fx.forest.clone();
    let mutations = vec![
        Mutation::SetParameter {
            node_id: "ghost".to_string(),
            parameter: "age".to_string(),
        },
        set_operator("ghost", Operator::Range),
        set_value("ghost", ValueEdit::Clear),
        add_action("ghost", ActionKind::Result, "VALIDATE"),
        add_child("ghost"),
        Mutation::RemoveNode {
            node_id: "ghost".to_string(),
        },
    ];
    for mutation in mutations {
        assert_eq!(fx.apply(mutation), Ok(Outcome::NotFound));
    }
    assert_eq!(fx.forest, before);
}

#[test]
fn test_remove_node_cascades() {
    let mut fx = Fixture::new(OperatorProfile::Full);
    fx.apply(add_child("root-1")).unwrap();
    fx.apply(add_child("root-1-child-0")).unwrap();
    assert_eq!(fx.forest.node_count(), 3);

    assert_eq!(
        fx.apply(Mutation::RemoveNode {
            node_id: "root-1-child-0".to_string()
        }),
        Ok(Outcome::Applied)
    );
    assert_eq!(fx.forest.node_count(), 1);
    assert!(Outcome::Applied.changed_tree());
    assert!(!Outcome::Unchanged.changed_tree());
}
