//! Project export payload.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Name used in the upload file name when the export carries none.
pub const DEFAULT_FILE_STEM: &str = "VF-Project";

/// Project name reported in the result when the export carries none.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown";

/// Extension of uploaded project files.
pub const PROJECT_FILE_EXTENSION: &str = "vf";

/// A previously fetched project export.
///
/// The payload is opaque apart from the optional `project.name` field and is
/// uploaded exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectData(Value);

impl ProjectData {
    /// Wraps a JSON value, rejecting `null`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingData`] when `value` is `null`.
    pub fn new(value: Value) -> DomainResult<Self> {
        if value.is_null() {
            return Err(DomainError::MissingData);
        }
        Ok(Self(value))
    }

    /// Returns the `project.name` field if it is a non-empty string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("project")
            .and_then(|project| project.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Project name for the result record.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNKNOWN_PROJECT_NAME)
    }

    /// Builds the upload file name: `<name>-<unix-millis>.vf`.
    #[must_use]
    pub fn file_name(&self, unix_millis: i64) -> String {
        format!(
            "{}-{unix_millis}.{PROJECT_FILE_EXTENSION}",
            self.name().unwrap_or(DEFAULT_FILE_STEM)
        )
    }

    /// Serializes the whole export to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Serialization`] if the value cannot be encoded.
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(&self.0).map_err(|e| DomainError::Serialization(e.to_string()))
    }
}
