//! vfimport Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest transports, the system clock,
//! environment configuration and tracing setup used by the binary.

pub mod adapters;
pub mod config;
pub mod http;
pub mod logging;

pub use adapters::{FormTransport, ReqwestTransport, SystemClock};
pub use config::{ConfigError, ImporterConfig, TransportKind};
pub use logging::{env_filter, init_tracing};
