/*
Outline rendering for the full forest, independent of expansion state.

termtree owns the connector drawing; we only supply labels and nesting.
 */
use termtree::Tree;

use crate::domain::tree::{Forest, TreeNode};
use crate::domain::view::DisplayOptions;

pub trait ToOutline {
    fn to_outline(&self, display: &DisplayOptions) -> Tree<String>;
}

impl ToOutline for TreeNode {
    fn to_outline(&self, display: &DisplayOptions) -> Tree<String> {
        let mut label = format!("{} [{}]", display.title(&self.attributes), self.uid);
        if let Some(relation) = &self.relation {
            label.push_str(&format!(" ({})", relation));
        }

        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_outline(display))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

impl Forest {
    /// One outline per root.
    pub fn outlines(&self, display: &DisplayOptions) -> Vec<Tree<String>> {
        self.roots()
            .iter()
            .map(|root| root.to_outline(display))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build;
    use crate::domain::entities::RawRecord;
    use serde_json::json;

    #[test]
    fn given_nested_record_when_outlining_then_shows_relation_and_uid() {
        let records: Vec<RawRecord> = serde_json::from_value(json!([
            {"data": {"Name": "A"}, "children": {"child": {"records": [{"data": {"Name": "B"}}]}}}
        ]))
        .unwrap();
        let forest = build(&records);

        let text = forest.outlines(&DisplayOptions::default())[0].to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A [1]");
        assert!(lines[1].ends_with("B [2] (child)"), "got: {}", lines[1]);
    }
}
