//! Raw body transport using reqwest.
//!
//! Sends the pre-encoded multipart body and the request's headers exactly as
//! built, so the server sees the same bytes a browser upload would produce.

use std::time::Duration;

use reqwest::Client;
use vfimport_application::{Transport, TransportError, TransportFuture};
use vfimport_domain::ImportRequest;

use crate::http::{build_client, map_error, read_response};

/// Transport posting the encoded body verbatim.
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Name reported in logs.
    pub const NAME: &'static str = "raw";

    /// Creates a transport with its own client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }
}

impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invoke<'a>(&'a self, request: &'a ImportRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            let mut builder = self.client.post(request.url().clone());

            // Headers go out as built, content type and boundary included.
            for (name, value) in request.headers() {
                builder = builder.header(name, value);
            }

            // Body bytes are the hand-framed multipart encoding.
            let response = builder
                .body(request.body().to_string())
                .send()
                .await
                .map_err(|e| map_error(&e, self.timeout))?;

            // Non-2xx ends the chain as a rejection.
            read_response(response).await
        })
    }
}
