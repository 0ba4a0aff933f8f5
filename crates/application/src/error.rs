//! Application error types

use thiserror::Error;
use vfimport_domain::DomainError;

/// Errors that end an import without a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Input validation or request construction failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Every configured transport raised an error.
    #[error("no transport available: all {attempts} transport(s) failed")]
    NoTransportAvailable {
        /// Number of transports tried.
        attempts: usize,
    },

    /// The import endpoint refused the upload.
    #[error("import rejected via {transport} transport (HTTP {status}): {body}")]
    Rejected {
        /// Transport that delivered the request.
        transport: String,
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },
}

/// Result type alias for import operations.
pub type ImportOutcome<T> = Result<T, ImportError>;
