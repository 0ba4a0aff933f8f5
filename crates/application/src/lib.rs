//! vfimport Application - Use case and ports
//!
//! This crate defines the application layer with:
//! - Port traits for transports and time
//! - The transport fallback chain
//! - The import use case and its error type

pub mod error;
pub mod import_project;
pub mod ports;
pub mod transport_chain;

pub use error::{ImportError, ImportOutcome};
pub use import_project::{BOUNDARY_PREFIX, ImportProject, generate_boundary};
pub use ports::{Clock, Transport, TransportError, TransportFuture};
pub use transport_chain::TransportChain;
