//! Hierarchy session: the owning container of the forest and its view state.
//!
//! Every user action arrives as an `Event` and is applied synchronously, in
//! arrival order, before the next render.

use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{visible_rows, DisplayOptions, ExpansionState, Forest, Row, Uid};

/// A user action against the hierarchy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Toggle(Uid),
    ExpandAll,
    CollapseAll,
    Remove(Uid),
    Show,
    Help,
    Quit,
}

/// What the caller should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Help,
    Quit,
}

impl FromStr for Event {
    type Err = ApplicationError;

    /// Parse `"<command> [uid]"`, e.g. `toggle 3`, `r 7`, `expand-all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().unwrap_or("show").to_ascii_lowercase();
        let argument = parts.next();
        if let Some(extra) = parts.next() {
            return Err(ApplicationError::InvalidInput {
                message: format!("unexpected argument: {extra}"),
            });
        }

        let uid = || -> ApplicationResult<Uid> {
            let raw = argument.ok_or_else(|| ApplicationError::InvalidInput {
                message: format!("'{command}' needs a node id"),
            })?;
            Ok(raw.parse::<Uid>()?)
        };
        let bare = |event: Event| -> ApplicationResult<Event> {
            match argument {
                Some(arg) => Err(ApplicationError::InvalidInput {
                    message: format!("'{command}' takes no argument, got {arg}"),
                }),
                None => Ok(event),
            }
        };

        match command.as_str() {
            "toggle" | "t" => Ok(Event::Toggle(uid()?)),
            "remove" | "rm" | "r" => Ok(Event::Remove(uid()?)),
            "expand-all" | "expand" | "e" => bare(Event::ExpandAll),
            "collapse-all" | "collapse" | "c" => bare(Event::CollapseAll),
            "show" | "s" => bare(Event::Show),
            "help" | "h" | "?" => bare(Event::Help),
            "quit" | "q" | "exit" => bare(Event::Quit),
            other => Err(ApplicationError::UnknownCommand(other.to_string())),
        }
    }
}

/// Help text listing the accepted event syntax.
pub const EVENT_HELP: &str = "\
commands:
  toggle <id>    (t)  expand or collapse one node
  expand-all     (e)  expand every node
  collapse-all   (c)  collapse every node
  remove <id>    (r)  remove a node and everything below it
  show           (s)  render the table again
  help           (?)  this text
  quit           (q)  leave";

#[derive(Debug, Clone)]
pub struct HierarchySession {
    forest: Forest,
    expansion: ExpansionState,
    display: DisplayOptions,
}

impl HierarchySession {
    pub fn new(forest: Forest, display: DisplayOptions) -> Self {
        Self {
            forest,
            expansion: ExpansionState::new(),
            display,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    pub fn toggle(&mut self, uid: Uid) {
        self.expansion.toggle(uid);
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.forest);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Swap in a forest without `uid`. Expansion entries are kept as they are.
    pub fn remove(&mut self, uid: Uid) {
        self.forest = self.forest.without(uid);
    }

    /// One-shot view setup: removals first, then expand-all, then toggles.
    ///
    /// A toggle after expand-all collapses that node again.
    pub fn apply_flags(&mut self, remove: &[Uid], expand_all: bool, toggle: &[Uid]) {
        for uid in remove {
            self.remove(*uid);
        }
        if expand_all {
            self.expand_all();
        }
        for uid in toggle {
            self.toggle(*uid);
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        visible_rows(&self.forest, &self.expansion, &self.display)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, event: Event) -> Outcome {
        match event {
            Event::Toggle(uid) => self.toggle(uid),
            Event::ExpandAll => self.expand_all(),
            Event::CollapseAll => self.collapse_all(),
            Event::Remove(uid) => self.remove(uid),
            Event::Show => {}
            Event::Help => return Outcome::Help,
            Event::Quit => return Outcome::Quit,
        }
        debug!(
            "{} nodes, {} expansion entries",
            self.forest.node_count(),
            self.expansion.len()
        );
        Outcome::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("toggle 3", Event::Toggle(Uid(3)))]
    #[case("t 3", Event::Toggle(Uid(3)))]
    #[case("  REMOVE   12 ", Event::Remove(Uid(12)))]
    #[case("r 1", Event::Remove(Uid(1)))]
    #[case("expand-all", Event::ExpandAll)]
    #[case("e", Event::ExpandAll)]
    #[case("collapse", Event::CollapseAll)]
    #[case("", Event::Show)]
    #[case("?", Event::Help)]
    #[case("exit", Event::Quit)]
    fn given_command_text_when_parsing_then_yields_event(#[case] input: &str, #[case] expected: Event) {
        assert_eq!(input.parse::<Event>().unwrap(), expected);
    }

    #[rstest]
    #[case("toggle")]
    #[case("toggle x")]
    #[case("expand-all 3")]
    #[case("remove 1 2")]
    #[case("dance")]
    fn given_bad_command_text_when_parsing_then_errors(#[case] input: &str) {
        assert!(input.parse::<Event>().is_err());
    }
}
