//! Importer input.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::project::ProjectData;

/// Minimum number of characters a real auth token has.
pub const MIN_AUTH_TOKEN_LEN: usize = 50;

/// Raw values handed to the importer by its caller.
///
/// Nothing here is trusted; [`ImportInput::validate`] checks it before any
/// request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportInput {
    /// The project export, if any.
    pub project_data: Option<Value>,
    /// Bearer token for the import endpoint.
    pub auth_token: Option<String>,
    /// Workspace receiving the import.
    pub workspace_id: Option<String>,
}

impl ImportInput {
    /// Creates an input with all three values present.
    #[must_use]
    pub fn new(
        project_data: Value,
        auth_token: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Self {
        Self {
            project_data: Some(project_data),
            auth_token: Some(auth_token.into()),
            workspace_id: Some(workspace_id.into()),
        }
    }

    /// Checks the input and returns its validated form.
    ///
    /// Checks run in order: project data, token, workspace.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingData`] if project data is absent or `null`
    /// - [`DomainError::InvalidToken`] if the token is absent or shorter than
    ///   [`MIN_AUTH_TOKEN_LEN`] characters
    /// - [`DomainError::InvalidWorkspace`] if the workspace id is absent or blank
    pub fn validate(self) -> DomainResult<ValidatedInput> {
        let project = ProjectData::new(self.project_data.unwrap_or(Value::Null))?;

        let auth_token = self
            .auth_token
            .filter(|token| token.chars().count() >= MIN_AUTH_TOKEN_LEN)
            .ok_or(DomainError::InvalidToken)?;

        let workspace_id = self
            .workspace_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(DomainError::InvalidWorkspace)?;

        Ok(ValidatedInput {
            project,
            auth_token,
            workspace_id,
        })
    }
}

/// Input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    /// The project export.
    pub project: ProjectData,
    /// Bearer token, at least [`MIN_AUTH_TOKEN_LEN`] characters.
    pub auth_token: String,
    /// Non-blank workspace id.
    pub workspace_id: String,
}

/// Output of the upstream step that fetched the project export.
///
/// Fields are loosely typed so that any JSON the upstream step emits reaches
/// validation and ends up in a result record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpstreamPayload {
    /// The project export.
    #[serde(rename = "vfProjectData", default)]
    pub project_data: Option<Value>,
    /// Bearer token.
    #[serde(rename = "VF_AUTH_TOKEN", default)]
    pub auth_token: Option<Value>,
    /// Target workspace.
    #[serde(rename = "VF_WORKSPACE_ID", default)]
    pub workspace_id: Option<Value>,
}

impl From<UpstreamPayload> for ImportInput {
    fn from(payload: UpstreamPayload) -> Self {
        // Only a string is a token; anything else fails validation.
        let auth_token = match payload.auth_token {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };

        // Numeric ids are used as written.
        let workspace_id = match payload.workspace_id {
            Some(Value::String(id)) => Some(id),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        Self {
            project_data: payload.project_data,
            auth_token,
            workspace_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(len: usize) -> String {
        "t".repeat(len)
    }

    #[test]
    fn test_valid_input() {
        let input = ImportInput::new(json!({"project": {}}), token(50), " ws-1 ");
        let validated = input.validate().unwrap();
        assert_eq!(validated.workspace_id, "ws-1");
        assert_eq!(validated.auth_token.len(), 50);
    }

    #[test]
    fn test_missing_data_checked_first() {
        let input = ImportInput {
            project_data: None,
            auth_token: None,
            workspace_id: None,
        };
        assert_eq!(input.validate(), Err(DomainError::MissingData));

        let input = ImportInput::new(Value::Null, token(50), "ws");
        assert_eq!(input.validate(), Err(DomainError::MissingData));
    }

    #[test]
    fn test_short_or_missing_token() {
        let input = ImportInput::new(json!({}), token(49), "ws");
        assert_eq!(input.validate(), Err(DomainError::InvalidToken));

        let input = ImportInput {
            auth_token: None,
            ..ImportInput::new(json!({}), "", "ws")
        };
        assert_eq!(input.validate(), Err(DomainError::InvalidToken));
    }

    #[test]
    fn test_token_length_counts_characters() {
        // 25 two-byte characters are 50 bytes but only 25 characters.
        let input = ImportInput::new(json!({}), "é".repeat(25), "ws");
        assert_eq!(input.validate(), Err(DomainError::InvalidToken));
    }

    #[test]
    fn test_blank_workspace() {
        let input = ImportInput::new(json!({}), token(64), "   ");
        assert_eq!(input.validate(), Err(DomainError::InvalidWorkspace));
    }

    #[test]
    fn test_upstream_payload_field_names() {
        let payload: UpstreamPayload = serde_json::from_value(json!({
            "vfProjectData": {"project": {"name": "Foo"}},
            "VF_AUTH_TOKEN": "abc",
            "VF_WORKSPACE_ID": "ws-9",
        }))
        .unwrap();

        let input = ImportInput::from(payload);
        assert_eq!(input.project_data, Some(json!({"project": {"name": "Foo"}})));
        assert_eq!(input.auth_token.as_deref(), Some("abc"));
        assert_eq!(input.workspace_id.as_deref(), Some("ws-9"));
    }

    #[test]
    fn test_upstream_payload_missing_fields() {
        let payload: UpstreamPayload = serde_json::from_value(json!({})).unwrap();
        let input = ImportInput::from(payload);
        assert_eq!(input.validate(), Err(DomainError::MissingData));
    }

    #[test]
    fn test_upstream_payload_numeric_workspace() {
        let payload: UpstreamPayload = serde_json::from_value(json!({
            "vfProjectData": {"project": {}},
            "VF_AUTH_TOKEN": token(50),
            "VF_WORKSPACE_ID": 12345,
        }))
        .unwrap();

        let validated = ImportInput::from(payload).validate().unwrap();
        assert_eq!(validated.workspace_id, "12345");
    }

    #[test]
    fn test_upstream_payload_non_string_token() {
        let payload: UpstreamPayload = serde_json::from_value(json!({
            "vfProjectData": {"project": {}},
            "VF_AUTH_TOKEN": 42,
            "VF_WORKSPACE_ID": "ws",
        }))
        .unwrap();

        let input = ImportInput::from(payload);
        assert_eq!(input.auth_token, None);
        assert_eq!(input.validate(), Err(DomainError::InvalidToken));
    }

    #[test]
    fn test_upstream_payload_object_workspace() {
        let payload: UpstreamPayload = serde_json::from_value(json!({
            "vfProjectData": {},
            "VF_AUTH_TOKEN": token(50),
            "VF_WORKSPACE_ID": {"id": "ws"},
        }))
        .unwrap();

        let input = ImportInput::from(payload);
        assert_eq!(input.validate(), Err(DomainError::InvalidWorkspace));
    }
}
