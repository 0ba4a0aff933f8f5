//! vfimport - command line wiring for the import step
//!
//! Reads the upstream step's payload, runs the importer with the configured
//! transports and renders the single-element result sequence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use vfimport_application::{Clock, ImportProject};
use vfimport_domain::{ImportInput, ImportResult, UpstreamPayload};
use vfimport_infrastructure::{ConfigError, ImporterConfig, SystemClock};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "vfimport",
    version,
    about = "Upload a project export to the assistant import endpoint"
)]
pub struct Cli {
    /// JSON file holding `vfProjectData`, `VF_AUTH_TOKEN` and
    /// `VF_WORKSPACE_ID`. Reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Errors raised before the importer runs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The payload could not be read.
    #[error("failed to read {source_name}: {source}")]
    Read {
        /// File path or `stdin`.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid JSON of the expected shape.
    #[error("invalid upstream payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Reads the upstream payload from `path`, or stdin when `None`.
///
/// # Errors
///
/// Returns [`AppError::Read`] on I/O failure and
/// [`AppError::InvalidPayload`] if the bytes are not a payload object.
pub async fn read_payload(path: Option<&Path>) -> Result<UpstreamPayload, AppError> {
    match path {
        Some(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Read {
                source_name: path.display().to_string(),
                source,
            })?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        None => read_payload_from(tokio::io::stdin(), "stdin").await,
    }
}

/// Reads the upstream payload from any async reader.
///
/// # Errors
///
/// Returns [`AppError::Read`] on I/O failure and
/// [`AppError::InvalidPayload`] if the bytes are not a payload object.
pub async fn read_payload_from<R: AsyncRead + Unpin>(
    mut reader: R,
    source_name: &str,
) -> Result<UpstreamPayload, AppError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|source| AppError::Read {
            source_name: source_name.to_string(),
            source,
        })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Runs one import and returns the result sequence.
///
/// # Errors
///
/// Returns [`AppError::Config`] if the transports cannot be created. Import
/// failures are reported inside the returned record.
pub async fn run_import(
    config: &ImporterConfig,
    payload: UpstreamPayload,
) -> Result<Vec<ImportResult>, AppError> {
    let chain = config.build_chain()?;
    tracing::debug!(transports = ?chain.names(), "Transport chain ready");

    let use_case = ImportProject::new(chain, Arc::new(SystemClock))
        .with_endpoint(config.endpoint.clone());

    let result = use_case.execute(ImportInput::from(payload)).await;
    Ok(vec![result])
}

/// Runs the import for whatever the payload step produced.
///
/// An unreadable or malformed payload still yields one failure record.
///
/// # Errors
///
/// Returns [`AppError::Config`] if the transports cannot be created.
pub async fn import_payload(
    config: &ImporterConfig,
    payload: Result<UpstreamPayload, AppError>,
) -> Result<Vec<ImportResult>, AppError> {
    match payload {
        Ok(payload) => run_import(config, payload).await,
        Err(error) => {
            tracing::warn!(error = %error, "Upstream payload unusable");
            Ok(vec![ImportResult::failed(error.to_string(), SystemClock.now())])
        }
    }
}

/// Renders the result sequence as pretty JSON.
///
/// # Errors
///
/// Returns [`AppError::InvalidPayload`] if serialization fails.
pub fn render(results: &[ImportResult]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Reads input, runs the import and prints the result to stdout.
///
/// Returns whether the import succeeded.
///
/// # Errors
///
/// Returns an [`AppError`] if configuration is unusable. Payload problems
/// are reported in the printed record.
pub async fn run(cli: &Cli, config: &ImporterConfig) -> Result<bool, AppError> {
    let payload = read_payload(cli.input.as_deref()).await;
    let results = import_payload(config, payload).await?;
    println!("{}", render(&results)?);
    Ok(results.iter().all(ImportResult::is_success))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_input_flag() {
        let cli = Cli::try_parse_from(["vfimport", "--input", "payload.json"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("payload.json")));

        let cli = Cli::try_parse_from(["vfimport"]).unwrap();
        assert_eq!(cli.input, None);
    }

    #[tokio::test]
    async fn test_read_payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vfProjectData": {{"project": {{"name": "Foo"}}}}, "VF_WORKSPACE_ID": "ws"}}"#
        )
        .unwrap();

        let payload = read_payload(Some(file.path())).await.unwrap();
        assert_eq!(payload.workspace_id, Some(serde_json::json!("ws")));
        assert_eq!(payload.auth_token, None);
    }

    #[tokio::test]
    async fn test_read_payload_missing_file() {
        let err = read_payload(Some(Path::new("/definitely/not/here.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_payload_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_payload(Some(file.path())).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_malformed_stream_becomes_failure_record() {
        let payload = read_payload_from(&b"{not json"[..], "stdin").await;
        assert!(matches!(payload, Err(AppError::InvalidPayload(_))));

        let config = ImporterConfig::from_lookup(|_| None).unwrap();
        let results = import_payload(&config, payload).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].is_success());
        assert!(
            results[0]
                .error()
                .unwrap()
                .starts_with("invalid upstream payload:")
        );

        let rendered: serde_json::Value = serde_json::from_str(&render(&results).unwrap()).unwrap();
        assert_eq!(rendered[0]["success"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn test_numeric_workspace_from_stream() {
        let payload = read_payload_from(
            &br#"{"vfProjectData": {}, "VF_AUTH_TOKEN": "x", "VF_WORKSPACE_ID": 12345}"#[..],
            "stdin",
        )
        .await
        .unwrap();
        assert_eq!(payload.workspace_id, Some(serde_json::json!(12345)));
    }
}
