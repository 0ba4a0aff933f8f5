//! Ordered transport fallback.

use std::sync::Arc;

use serde_json::Value;
use vfimport_domain::ImportRequest;

use crate::error::{ImportError, ImportOutcome};
use crate::ports::{Transport, TransportError};

/// Transports tried one after another until one delivers the upload.
///
/// Only one request is in flight at a time. A failed attempt is logged and
/// the next transport is tried, except for [`TransportError::Rejected`],
/// which ends the chain.
#[derive(Clone, Default)]
pub struct TransportChain {
    transports: Vec<Arc<dyn Transport>>,
}

impl TransportChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transport.
    #[must_use]
    pub fn with(mut self, transport: impl Transport + 'static) -> Self {
        self.transports.push(Arc::new(transport));
        self
    }

    /// Number of transports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// Returns true if the chain has no transports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Transport names in try order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    /// Delivers the request through the first transport that succeeds.
    ///
    /// # Errors
    ///
    /// - [`ImportError::Rejected`] if a transport reports a non-success
    ///   HTTP status
    /// - [`ImportError::NoTransportAvailable`] if every transport failed
    pub async fn send(&self, request: &ImportRequest) -> ImportOutcome<Value> {
        for transport in &self.transports {
            tracing::debug!(transport = transport.name(), "Trying transport");

            match transport.invoke(request).await {
                Ok(response) => {
                    tracing::info!(transport = transport.name(), "Transport delivered upload");
                    return Ok(response);
                }
                Err(TransportError::Rejected { status, body }) => {
                    return Err(ImportError::Rejected {
                        transport: transport.name().to_string(),
                        status,
                        body,
                    });
                }
                Err(error) => {
                    tracing::debug!(
                        transport = transport.name(),
                        error = %error,
                        "Transport failed, trying next"
                    );
                }
            }
        }

        Err(ImportError::NoTransportAvailable {
            attempts: self.transports.len(),
        })
    }
}

impl std::fmt::Debug for TransportChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportChain")
            .field("transports", &self.names())
            .finish()
    }
}
