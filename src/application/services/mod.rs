//! Application services

pub mod loader;
pub mod picker;

pub use loader::{parse_records, RecordLoader};
pub use picker::NodePicker;
