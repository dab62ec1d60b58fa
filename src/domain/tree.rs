//! Forest of uid-tagged nodes.
//!
//! A built forest is never mutated in place. Removal produces a new forest.

use tracing::{debug, instrument};

use crate::domain::entities::{Attributes, Uid};

/// Processed node: a copy of the record's attributes plus its children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub uid: Uid,
    pub attributes: Attributes,
    /// Name of the group this node came from; `None` for roots
    pub relation: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::subtree_size)
            .sum::<usize>()
    }
}

/// Ordered list of root nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    roots: Vec<TreeNode>,
}

impl Forest {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Number of roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes on all levels.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_size).sum()
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth 0.
    pub fn iter(&self) -> ForestIter<'_> {
        ForestIter::new(self)
    }

    /// All uids in pre-order.
    pub fn collect_uids(&self) -> Vec<Uid> {
        self.iter().map(|(_, node)| node.uid).collect()
    }

    pub fn find(&self, uid: Uid) -> Option<&TreeNode> {
        self.iter().map(|(_, node)| node).find(|node| node.uid == uid)
    }

    pub fn contains(&self, uid: Uid) -> bool {
        self.find(uid).is_some()
    }

    /// Copy of the forest with the node `uid` and its whole subtree dropped.
    ///
    /// An absent uid yields an equal forest.
    #[instrument(level = "debug", skip(self))]
    pub fn without(&self, uid: Uid) -> Forest {
        let roots = filter_nodes(&self.roots, uid);
        debug!(
            "removed {} node(s)",
            self.node_count() - roots.iter().map(TreeNode::subtree_size).sum::<usize>()
        );
        Forest { roots }
    }
}

fn filter_nodes(nodes: &[TreeNode], uid: Uid) -> Vec<TreeNode> {
    nodes
        .iter()
        .filter(|node| node.uid != uid)
        .map(|node| TreeNode {
            uid: node.uid,
            attributes: node.attributes.clone(),
            relation: node.relation.clone(),
            children: filter_nodes(&node.children, uid),
        })
        .collect()
}

pub struct ForestIter<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> ForestIter<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|node| (0, node)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for ForestIter<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = (usize, &'a TreeNode);
    type IntoIter = ForestIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
