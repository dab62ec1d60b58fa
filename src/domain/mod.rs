//! Domain layer: records, trees and view state
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod outline;
pub mod tree;
pub mod view;

pub use builder::{build, GroupPolicy, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use outline::ToOutline;
pub use tree::{Forest, ForestIter, TreeNode};
pub use view::{visible_rows, DisplayOptions, ExpansionState, Row};
