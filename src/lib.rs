//! hiertable: expandable hierarchy tables for nested JSON record sets
//!
//! Layers:
//! - `domain`: records, forest building, removal and view state (no I/O)
//! - `application`: session container, table rendering, loading services
//! - `infrastructure`: filesystem and selector implementations
//! - `cli`: argument parsing, command dispatch, interactive loop

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
