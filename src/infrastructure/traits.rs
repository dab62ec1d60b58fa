//! Seams between the application layer and the outside world
//!
//! Services receive these as `Arc<dyn ...>` so tests can swap in fakes for
//! the disk and the terminal picker.

use std::io;
use std::path::Path;

use crate::domain::Uid;

/// Read access to record documents on disk.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// False for directories and other non-regular entries.
    fn is_file(&self, path: &Path) -> bool;
}

/// One line offered by the node picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Text shown and matched against
    pub display: String,
    pub uid: Uid,
}

/// Fuzzy single-choice selection over node entries.
pub trait Selector: Send + Sync {
    /// Index into `items` of the chosen entry, `None` on abort.
    fn select_one(&self, items: &[SelectionItem], prompt: &str) -> Result<Option<usize>, String>;
}

/// `std::fs` backed document access.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Selector running skim in the lower half of the terminal.
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(&self, items: &[SelectionItem], prompt: &str) -> Result<Option<usize>, String> {
        use itertools::Itertools;
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        let lines = items.iter().map(|item| item.display.as_str()).join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("skim options: {e}"))?;

        let source = SkimItemReader::default().of_bufread(Cursor::new(lines));

        let Some(output) = Skim::run_with(&options, Some(source)) else {
            return Ok(None);
        };
        if output.is_abort {
            return Ok(None);
        }
        // display lines are unique: each one starts with the node uid
        Ok(output.selected_items.first().and_then(|chosen| {
            let text = chosen.output();
            items.iter().position(|item| item.display == text)
        }))
    }
}
