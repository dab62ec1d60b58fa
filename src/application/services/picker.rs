//! Interactive node selection
//!
//! Presents every node of the forest (full depth, ignoring expansion) to a
//! `Selector` and maps the choice back to a uid.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DisplayOptions, Forest, Uid};
use crate::infrastructure::traits::{SelectionItem, Selector};

pub struct NodePicker {
    selector: Arc<dyn Selector>,
}

impl NodePicker {
    pub fn new(selector: Arc<dyn Selector>) -> Self {
        Self { selector }
    }

    /// Selection entries in pre-order, indented by depth.
    pub fn items(forest: &Forest, display: &DisplayOptions) -> Vec<SelectionItem> {
        forest
            .iter()
            .map(|(depth, node)| {
                let relation = node
                    .relation
                    .as_deref()
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default();
                SelectionItem {
                    display: format!(
                        "{:>4}  {}{}{}",
                        node.uid,
                        "  ".repeat(depth),
                        display.title(&node.attributes),
                        relation
                    ),
                    uid: node.uid,
                }
            })
            .collect()
    }

    /// Returns `None` if the user cancels or the forest is empty.
    pub fn pick(&self, forest: &Forest, display: &DisplayOptions) -> ApplicationResult<Option<Uid>> {
        if forest.is_empty() {
            return Ok(None);
        }
        let items = Self::items(forest, display);
        let selected = self
            .selector
            .select_one(&items, "node> ")
            .map_err(ApplicationError::Selection)?;
        debug!("picked index: {:?}", selected);

        match selected {
            Some(index) => items
                .get(index)
                .map(|item| Some(item.uid))
                .ok_or_else(|| {
                    ApplicationError::Selection(format!("selector returned unknown entry {index}"))
                }),
            None => Ok(None),
        }
    }
}
