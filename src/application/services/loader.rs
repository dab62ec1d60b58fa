//! Record loading service
//!
//! Reads the input document and turns it into raw records. The document
//! must be a JSON array; anything else is rejected at load time.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::builder::json_kind;
use crate::domain::{DomainError, RawRecord};
use crate::infrastructure::traits::FileSystem;

/// Service for loading raw records from disk.
pub struct RecordLoader {
    fs: Arc<dyn FileSystem>,
}

impl RecordLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<RawRecord>> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::InvalidInput {
                message: format!("not a file: {}", path.display()),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read records", path)?;
        let records = parse_records(&content)?;
        debug!("loaded {} top-level records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Parse an in-memory document.
pub fn parse_records(content: &str) -> ApplicationResult<Vec<RawRecord>> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ApplicationError::InvalidInput {
            message: format!("not valid JSON: {e}"),
        })?;

    if !document.is_array() {
        return Err(DomainError::NotAnArray {
            found: json_kind(&document).to_string(),
        }
        .into());
    }

    serde_json::from_value(document).map_err(|e| ApplicationError::InvalidInput {
        message: format!("malformed top-level record: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_array_when_parsing_then_returns_no_records() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn given_object_document_when_parsing_then_not_an_array() {
        let err = parse_records(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NotAnArray { .. })
        ));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn given_broken_json_when_parsing_then_invalid_input() {
        let err = parse_records("[{").unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput { .. }));
    }
}
