//! Domain error types

use thiserror::Error;

/// Errors raised while validating input or building the import request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The upstream step supplied no project data.
    #[error("no project data found in upstream payload")]
    MissingData,

    /// The auth token is absent or too short to be a real credential.
    #[error("invalid or missing auth token")]
    InvalidToken,

    /// The workspace identifier is absent or blank.
    #[error("invalid or missing workspace id")]
    InvalidWorkspace,

    /// The import URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The project data could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
