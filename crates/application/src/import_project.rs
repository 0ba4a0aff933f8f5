//! Import Project Use Case
//!
//! Validates the caller's input, builds the multipart upload, delivers it
//! through the transport chain and folds the outcome into one
//! [`ImportResult`].

use std::sync::Arc;

use vfimport_domain::{ImportEndpoint, ImportInput, ImportRequest, ImportResult, ValidatedInput};

use crate::error::ImportOutcome;
use crate::ports::Clock;
use crate::transport_chain::TransportChain;

/// Prefix of generated multipart boundaries.
pub const BOUNDARY_PREFIX: &str = "----WebKitFormBoundary";

/// Generates a multipart boundary with 16 random hex digits.
#[must_use]
pub fn generate_boundary() -> String {
    format!("{BOUNDARY_PREFIX}{:016x}", rand::random::<u64>())
}

/// Use case for importing a project export into a workspace.
///
/// # Example
///
/// ```ignore
/// let chain = TransportChain::new()
///     .with(ReqwestTransport::new(timeout)?)
///     .with(FormTransport::new(timeout)?);
/// let use_case = ImportProject::new(chain, Arc::new(SystemClock));
///
/// let result = use_case.execute(ImportInput::new(data, token, workspace)).await;
/// ```
pub struct ImportProject<C: Clock> {
    transports: TransportChain,
    clock: Arc<C>,
    endpoint: ImportEndpoint,
}

impl<C: Clock> ImportProject<C> {
    /// Creates the use case targeting the default import host.
    pub fn new(transports: TransportChain, clock: Arc<C>) -> Self {
        Self {
            transports,
            clock,
            endpoint: ImportEndpoint::default(),
        }
    }

    /// Targets a different import host.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: ImportEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Runs the import and returns its single result record.
    ///
    /// Never fails: every error becomes a failure-shaped record.
    pub async fn execute(&self, input: ImportInput) -> ImportResult {
        match self.try_execute(input).await {
            Ok(result) => {
                tracing::info!(project_id = ?result.project_id(), "Import successful");
                result
            }
            Err(error) => {
                tracing::warn!(error = %error, "Import failed");
                ImportResult::failed(error.to_string(), self.clock.now())
            }
        }
    }

    /// Runs the import, returning the success record or the error.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ImportError`] on validation failure, transport
    /// exhaustion or server rejection.
    pub async fn try_execute(&self, input: ImportInput) -> ImportOutcome<ImportResult> {
        let (validated, request) = self.prepare(input)?;

        tracing::info!(file = request.file_name(), "Starting import");
        tracing::info!(
            url = %request.url(),
            boundary = request.boundary(),
            payload_bytes = request.body().len(),
            "Sending import request"
        );

        let response = self.transports.send(&request).await?;
        tracing::debug!(response = %response, "Import response");

        Ok(ImportResult::succeeded(
            request.file_name(),
            validated.project.display_name(),
            response,
            self.clock.now(),
        ))
    }

    /// Validates the input and builds the upload without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ImportError::Domain`] if validation or request
    /// construction fails.
    pub fn prepare(&self, input: ImportInput) -> ImportOutcome<(ValidatedInput, ImportRequest)> {
        let validated = input.validate()?;
        let request = ImportRequest::build(
            &self.endpoint,
            &validated,
            &generate_boundary(),
            self.clock.unix_millis(),
        )?;
        Ok((validated, request))
    }
}
