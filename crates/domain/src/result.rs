//! Normalized import outcome.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formats a timestamp as ISO-8601 UTC with millisecond precision.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Extracts the created project id from an import response.
///
/// Accepts a non-empty string or a number in the `id` field.
#[must_use]
pub fn project_id_of(response: &Value) -> Option<String> {
    match response.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Result record of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSuccess {
    /// Always `true`.
    pub success: bool,
    /// Name of the uploaded file.
    pub file_name: String,
    /// Project name from the export, or `"Unknown"`.
    pub project_name: String,
    /// Id of the created project, if the response carried one.
    pub project_id: Option<String>,
    /// Response body exactly as returned by the transport.
    pub response: Value,
    /// When the record was produced.
    pub timestamp: String,
}

/// Result record of a failed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    /// Always `false`.
    pub success: bool,
    /// Human readable failure reason.
    pub error: String,
    /// When the record was produced.
    pub timestamp: String,
}

/// The single record produced per import invocation.
///
/// Serializes untagged; deserialization picks the variant from the
/// `success` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportResult {
    /// The upload was accepted.
    Succeeded(ImportSuccess),
    /// Validation or delivery failed.
    Failed(ImportFailure),
}

impl<'de> Deserialize<'de> for ImportResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value.get("success").and_then(Value::as_bool) {
            Some(true) => serde_json::from_value(value)
                .map(Self::Succeeded)
                .map_err(de::Error::custom),
            Some(false) => serde_json::from_value(value)
                .map(Self::Failed)
                .map_err(de::Error::custom),
            None => Err(de::Error::missing_field("success")),
        }
    }
}

impl ImportResult {
    /// Creates a success record.
    #[must_use]
    pub fn succeeded(
        file_name: impl Into<String>,
        project_name: impl Into<String>,
        response: Value,
        at: DateTime<Utc>,
    ) -> Self {
        Self::Succeeded(ImportSuccess {
            success: true,
            file_name: file_name.into(),
            project_name: project_name.into(),
            project_id: project_id_of(&response),
            response,
            timestamp: format_timestamp(at),
        })
    }

    /// Creates a failure record.
    #[must_use]
    pub fn failed(error: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::Failed(ImportFailure {
            success: false,
            error: error.into(),
            timestamp: format_timestamp(at),
        })
    }

    /// Returns whether the import succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Returns the created project id, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded(s) => s.project_id.as_deref(),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(f) => Some(&f.error),
        }
    }

    /// Returns the record timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        match self {
            Self::Succeeded(s) => &s.timestamp,
            Self::Failed(f) => &f.timestamp,
        }
    }
}
