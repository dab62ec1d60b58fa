//! Application layer: session state, rendering and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod render;
pub mod services;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use render::{TableRenderer, NO_DATA_MESSAGE};
pub use session::{Event, HierarchySession, Outcome, EVENT_HELP};
