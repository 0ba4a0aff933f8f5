//! HTTP infrastructure shared by the reqwest transports.
//!
//! This module provides:
//! - Client construction with a request timeout
//! - Mapping of reqwest errors to `TransportError`
//! - Response decoding

mod response;

pub use response::{build_client, decode_body, map_error, read_response};
