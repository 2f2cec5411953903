use super::forest::Forest;
use super::node::ConditionNode;
use super::value::ConditionValue;
use itertools::Itertools;

/// Renders forests as indented, human-readable outlines.
pub struct OutlineFormatter;

impl OutlineFormatter {
    /// Format a whole forest, one line per node, children indented under their parent.
    pub fn format_forest(forest: &Forest) -> String {
        forest
            .walk()
            .map(|(depth, node)| format!("{}{}", "  ".repeat(depth), Self::format_node(node)))
            .join("\n")
    }

    /// Format a single node without its children.
    pub fn format_node(node: &ConditionNode) -> String {
        let parameter = if node.parameter.is_empty() {
            "<unset>"
        } else {
            node.parameter.as_str()
        };

        let mut line = format!("[{}] {} {}", node.id, parameter, node.operator);
        if let Some(value) = Self::format_value(&node.value) {
            line.push(' ');
            line.push_str(&value);
        }
        if !node.process_actions.is_empty() {
            line.push_str(&format!(" + {}", node.process_actions.join(", ")));
        }
        if node.is_terminal() {
            line.push_str(&format!(" => {} (terminal)", node.result_actions.join(", ")));
        }
        line
    }

    fn format_value(value: &ConditionValue) -> Option<String> {
        match value {
            ConditionValue::Scalar(s) if s.is_empty() => None,
            ConditionValue::Scalar(s) => Some(format!("\"{}\"", s)),
            ConditionValue::Range(r) => Some(format!("[{} .. {}]", r.min, r.max)),
            ConditionValue::State(Some(state)) => Some(state.to_string()),
            ConditionValue::State(None) | ConditionValue::Absent => None,
        }
    }
}
