//! Transport port

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;
use vfimport_domain::ImportRequest;

/// Boxed future returned by [`Transport::invoke`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;

/// Errors a transport can raise while delivering an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The transport cannot run in this environment.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not finish in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The server answered but the response could not be read.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns whether the server itself refused the upload.
    ///
    /// A rejection means the request reached the endpoint, so replaying it
    /// through another transport would only repeat the upload.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// One way of delivering an [`ImportRequest`] to the import endpoint.
///
/// Implementations return the decoded response body. They own their
/// timeouts; the importer never cancels a call.
pub trait Transport: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Sends the request and returns the decoded response body.
    fn invoke<'a>(&'a self, request: &'a ImportRequest) -> TransportFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rejected_is_rejection() {
        assert!(
            TransportError::Rejected {
                status: 401,
                body: String::new(),
            }
            .is_rejection()
        );
        assert!(!TransportError::Timeout { timeout_ms: 10 }.is_rejection());
        assert!(!TransportError::Unavailable("x".into()).is_rejection());
    }

    #[test]
    fn test_rejected_message() {
        let err = TransportError::Rejected {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "HTTP 403: forbidden");
    }
}
