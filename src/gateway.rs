//! Turns "item dropped onto a node" events into mutations.
//!
//! Only the combinations listed in [`route`] do anything. Every other drop is
//! ignored without an error; the builder's drop targets already signal which
//! items they take.

use crate::rules::Mutation;
use crate::tree::ActionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Parameter,
    Action,
}

/// The part of a node an item was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Parameter,
    Process,
    Result,
    Children,
}

/// The dragged item, as captured by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggedItem {
    pub kind: ItemKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_kind: Option<ActionKind>,
}

impl DraggedItem {
    pub fn parameter(value: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Parameter,
            value: value.into(),
            action_kind: None,
        }
    }

    pub fn action(kind: ActionKind, name: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Action,
            value: name.into(),
            action_kind: Some(kind),
        }
    }
}

/// A complete drop event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub item: DraggedItem,
    pub target_id: String,
    pub zone: DropZone,
}

impl Assignment {
    pub fn new(item: DraggedItem, target_id: impl Into<String>, zone: DropZone) -> Self {
        Self {
            item,
            target_id: target_id.into(),
            zone,
        }
    }
}

/// Maps a drop onto the one mutation it stands for, or `None` when the item
/// does not belong in that zone.
///
/// | zone      | item      | action kind | mutation          |
/// |-----------|-----------|-------------|-------------------|
/// | parameter | parameter | -           | `SetParameter`    |
/// | process   | action    | process     | `AddAction`       |
/// | result    | action    | result      | `AddAction`       |
/// | children  | parameter | -           | `AddChild`        |
pub fn route(assignment: &Assignment) -> Option<Mutation> {
    let item = &assignment.item;
    let node_id = assignment.target_id.clone();

    match (assignment.zone, item.kind, item.action_kind) {
        (DropZone::Parameter, ItemKind::Parameter, _) => Some(Mutation::SetParameter {
            node_id,
            parameter: item.value.clone(),
        }),
        (DropZone::Process, ItemKind::Action, Some(ActionKind::Process)) => {
            Some(Mutation::AddAction {
                node_id,
                kind: ActionKind::Process,
                action: item.value.clone(),
            })
        }
        (DropZone::Result, ItemKind::Action, Some(ActionKind::Result)) => {
            Some(Mutation::AddAction {
                node_id,
                kind: ActionKind::Result,
                action: item.value.clone(),
            })
        }
        (DropZone::Children, ItemKind::Parameter, _) => Some(Mutation::AddChild {
            parent_id: node_id,
            parameter: Some(item.value.clone()),
        }),
        _ => None,
    }
}
