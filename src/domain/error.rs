//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::Uid;

/// Domain errors represent malformed input data or invalid identifiers.
/// These are independent of I/O concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("top-level document must be an array of records, found {found}")]
    NotAnArray { found: String },

    #[error("malformed children of node {parent}: {reason}")]
    MalformedChildren { parent: Uid, reason: String },

    #[error("malformed group '{relation}' under node {parent}: {reason}")]
    MalformedGroup {
        parent: Uid,
        relation: String,
        reason: String,
    },

    #[error("malformed record #{index} in group '{relation}' under node {parent}: {reason}")]
    MalformedRecord {
        parent: Uid,
        relation: String,
        index: usize,
        reason: String,
    },

    #[error("invalid node id: '{0}'")]
    InvalidUid(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
