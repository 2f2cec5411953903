use super::ids::{IdGenerator, IdRequest};
use super::node::ConditionNode;
use crate::error::ValidationRejection;

/// The ordered roots of one algorithm's decision tree.
///
/// Every node is addressed by its id; callers never hold parent references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<ConditionNode>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: Vec<ConditionNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[ConditionNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<ConditionNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn push_root(&mut self, root: ConditionNode) {
        self.roots.push(root);
    }

    pub fn find(&self, id: &str) -> Option<&ConditionNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ConditionNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Applies `transform` to the node with `target_id`.
    ///
    /// Returns `None` when no such node exists, leaving the forest untouched.
    pub fn find_and_transform<T, F>(&mut self, target_id: &str, transform: F) -> Option<T>
    where
        F: FnOnce(&mut ConditionNode) -> T,
    {
        self.find_mut(target_id).map(transform)
    }

    /// Removes the node with `target_id` together with its subtree.
    ///
    /// Roots are removed unconditionally; there is no protected root.
    pub fn remove_by_id(&mut self, target_id: &str) -> Option<ConditionNode> {
        if let Some(pos) = self.roots.iter().position(|root| root.id == target_id) {
            return Some(self.roots.remove(pos));
        }
        self.roots
            .iter_mut()
            .find_map(|root| root.remove_descendant(target_id))
    }

    /// Appends a new empty condition below `parent_id`, carrying `parameter`.
    ///
    /// Returns `Ok(None)` on a lookup miss and the new child's id otherwise.
    pub fn append_child(
        &mut self,
        parent_id: &str,
        parameter: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<Option<String>, ValidationRejection> {
        let index = match self.find(parent_id) {
            None => return Ok(None),
            Some(parent) if parent.is_terminal() => {
                return Err(ValidationRejection::TerminalNode {
                    node_id: parent_id.to_string(),
                });
            }
            Some(parent) => parent.children.len(),
        };

        let child_id = self.fresh_id(ids, IdRequest::Child { parent_id, index });
        let child = ConditionNode::new(child_id.clone()).with_parameter(parameter);
        Ok(self
            .find_and_transform(parent_id, |parent| parent.children.push(child))
            .map(|_| child_id))
    }

    /// Appends a new empty root condition and returns its id.
    pub fn append_root(&mut self, ids: &mut dyn IdGenerator) -> String {
        let id = self.fresh_id(ids, IdRequest::Root);
        self.roots.push(ConditionNode::new(id.clone()));
        id
    }

    fn fresh_id(&self, ids: &mut dyn IdGenerator, request: IdRequest<'_>) -> String {
        loop {
            let id = ids.generate(request);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Pre-order walk over every node, yielding `(depth, node)` with roots at depth 0.
    pub fn walk(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: self.roots.iter().rev().map(|root| (0, root)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionNode> {
        self.walk().map(|(_, node)| node)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|node| node.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in the deepest branch; an empty forest has depth 0.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }
}

impl From<Vec<ConditionNode>> for Forest {
    fn from(roots: Vec<ConditionNode>) -> Self {
        Self::from_roots(roots)
    }
}

/// Iterator returned by [`Forest::walk`].
pub struct DepthFirst<'a> {
    stack: Vec<(usize, &'a ConditionNode)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a ConditionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
