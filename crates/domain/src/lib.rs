//! vfimport Domain - Core import types
//!
//! This crate defines the data that flows through a project import:
//! the validated input, the multipart upload and the normalized result.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod input;
pub mod multipart;
pub mod project;
pub mod request;
pub mod result;

pub use error::{DomainError, DomainResult};
pub use input::{ImportInput, MIN_AUTH_TOKEN_LEN, UpstreamPayload, ValidatedInput};
pub use multipart::{FormPart, MultipartForm};
pub use project::ProjectData;
pub use request::{DEFAULT_BASE_URL, ImportEndpoint, ImportRequest, TARGET_SCHEMA_VERSION};
pub use result::{ImportFailure, ImportResult, ImportSuccess};
