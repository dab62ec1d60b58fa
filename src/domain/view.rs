//! Hierarchy view: expansion state and the visible row model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::entities::{Attributes, Uid};
use crate::domain::tree::{Forest, TreeNode};

/// Per-node expanded flags. Absent entries count as collapsed.
///
/// Entries are not pruned when nodes are removed; uids are never reused
/// within a session, so stale entries are simply never read again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: HashMap<Uid, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for `uid`. Unknown uids just gain an unused entry.
    pub fn toggle(&mut self, uid: Uid) {
        let flag = self.flags.entry(uid).or_insert(false);
        *flag = !*flag;
        trace!("toggle {} -> {}", uid, *flag);
    }

    /// Replace the state with every uid of `forest` marked expanded.
    pub fn expand_all(&mut self, forest: &Forest) {
        self.flags = forest
            .collect_uids()
            .into_iter()
            .map(|uid| (uid, true))
            .collect();
    }

    pub fn collapse_all(&mut self) {
        self.flags.clear();
    }

    pub fn is_expanded(&self, uid: Uid) -> bool {
        self.flags.get(&uid).copied().unwrap_or(false)
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// How node attributes turn into row text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Attribute keys tried in order for the row title
    pub title_keys: Vec<String>,
    /// Title used when none of `title_keys` holds a value
    pub placeholder_title: String,
    /// Cell text for attribute values that print as nothing
    pub empty_value: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title_keys: vec!["Name".into(), "ID".into()],
            placeholder_title: "(no name)".into(),
            empty_value: "—".into(),
        }
    }
}

impl DisplayOptions {
    pub fn title(&self, attributes: &Attributes) -> String {
        self.title_keys
            .iter()
            .filter_map(|key| attributes.get(key))
            .find(|value| value.is_truthy())
            .map(|value| value.to_string())
            .unwrap_or_else(|| self.placeholder_title.clone())
    }

    /// Every attribute as text, in map order. Only values that print as
    /// nothing are replaced by `empty_value`; `false`, `0` and `null` show as such.
    pub fn cells(&self, attributes: &Attributes) -> Vec<(String, String)> {
        attributes
            .iter()
            .map(|(key, value)| {
                let text = value.to_string();
                if text.is_empty() {
                    (key.clone(), self.empty_value.clone())
                } else {
                    (key.clone(), text)
                }
            })
            .collect()
    }
}

/// One rendered line of the hierarchy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub uid: Uid,
    pub depth: usize,
    /// Last entry of its sibling group (roots included)
    pub is_last: bool,
    pub has_children: bool,
    pub expanded: bool,
    pub title: String,
    pub relation: Option<String>,
    pub cells: Vec<(String, String)>,
}

impl Row {
    fn new(node: &TreeNode, depth: usize, is_last: bool, expanded: bool, display: &DisplayOptions) -> Self {
        Self {
            uid: node.uid,
            depth,
            is_last,
            has_children: node.has_children(),
            expanded,
            title: display.title(&node.attributes),
            relation: node.relation.clone(),
            cells: display.cells(&node.attributes),
        }
    }
}

/// Rows currently visible: roots always, children only below expanded parents.
pub fn visible_rows(forest: &Forest, state: &ExpansionState, display: &DisplayOptions) -> Vec<Row> {
    let mut rows = Vec::new();
    push_rows(forest.roots(), 0, state, display, &mut rows);
    rows
}

fn push_rows(
    nodes: &[TreeNode],
    depth: usize,
    state: &ExpansionState,
    display: &DisplayOptions,
    rows: &mut Vec<Row>,
) {
    let last = nodes.len().saturating_sub(1);
    for (idx, node) in nodes.iter().enumerate() {
        let expanded = state.is_expanded(node.uid);
        rows.push(Row::new(node, depth, idx == last, expanded, display));
        if node.has_children() && expanded {
            push_rows(&node.children, depth + 1, state, display, rows);
        }
    }
}
