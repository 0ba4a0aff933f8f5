//! Importer configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use vfimport_application::{TransportChain, TransportError};
use vfimport_domain::{DEFAULT_BASE_URL, DomainError, ImportEndpoint};

use crate::adapters::{FormTransport, ReqwestTransport};

/// Variable overriding the import host.
pub const BASE_URL_VAR: &str = "VFIMPORT_BASE_URL";
/// Variable setting the per-transport timeout in seconds.
pub const TIMEOUT_VAR: &str = "VFIMPORT_TIMEOUT_SECS";
/// Variable listing transports in try order, comma separated.
pub const TRANSPORTS_VAR: &str = "VFIMPORT_TRANSPORTS";
/// Variable setting the fallback log filter.
pub const LOG_VAR: &str = "VFIMPORT_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is not an http(s) URL.
    #[error("VFIMPORT_BASE_URL: {0}")]
    InvalidBaseUrl(#[source] DomainError),

    /// The timeout is not a positive whole number of seconds.
    #[error("VFIMPORT_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    /// A transport name is not recognized.
    #[error("VFIMPORT_TRANSPORTS: unknown transport {0:?} (expected raw or form)")]
    UnknownTransport(String),

    /// The transport list is empty.
    #[error("VFIMPORT_TRANSPORTS must name at least one transport")]
    NoTransports,

    /// A transport could not be created.
    #[error("failed to create transport: {0}")]
    Transport(#[from] TransportError),
}

/// Transports that can be listed in [`TRANSPORTS_VAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// [`ReqwestTransport`]
    Raw,
    /// [`FormTransport`]
    Form,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "form" => Ok(Self::Form),
            other => Err(ConfigError::UnknownTransport(other.to_string())),
        }
    }
}

/// Importer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImporterConfig {
    /// Import host (default: the production realtime API)
    pub endpoint: ImportEndpoint,

    /// Per-transport request timeout (default: 120s)
    pub timeout: Duration,

    /// Transports in try order (default: raw, form)
    pub transports: Vec<TransportKind>,

    /// Log filter used when `RUST_LOG` is unset (default: info)
    pub log_filter: String,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            endpoint: ImportEndpoint::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transports: vec![TransportKind::Raw, TransportKind::Form],
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ImporterConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = ImportEndpoint::new(
            lookup(BASE_URL_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )
        .map_err(ConfigError::InvalidBaseUrl)?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let transports = match lookup(TRANSPORTS_VAR) {
            Some(raw) => raw
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<TransportKind>, _>>()?,
            None => vec![TransportKind::Raw, TransportKind::Form],
        };
        if transports.is_empty() {
            return Err(ConfigError::NoTransports);
        }

        let log_filter = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            endpoint,
            timeout,
            transports,
            log_filter,
        })
    }

    /// Builds the transport chain in configured order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if a transport cannot be created.
    pub fn build_chain(&self) -> Result<TransportChain, ConfigError> {
        let mut chain = TransportChain::new();
        for kind in &self.transports {
            chain = match kind {
                TransportKind::Raw => chain.with(ReqwestTransport::new(self.timeout)?),
                TransportKind::Form => chain.with(FormTransport::new(self.timeout)?),
            };
        }
        Ok(chain)
    }
}
