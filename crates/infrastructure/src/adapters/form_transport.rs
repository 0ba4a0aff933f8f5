//! Multipart form transport using reqwest.
//!
//! Rebuilds the upload with `reqwest::multipart::Form`. reqwest picks its own
//! boundary and content type, so only the remaining headers are copied over.

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use vfimport_application::{Transport, TransportError, TransportFuture};
use vfimport_domain::{FormPart, ImportRequest};

use crate::http::{build_client, map_error, read_response};

/// Transport letting reqwest encode the multipart body.
pub struct FormTransport {
    client: Client,
    timeout: Duration,
}

impl FormTransport {
    /// Name reported in logs.
    pub const NAME: &'static str = "form";

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

    fn build_form(parts: &[FormPart]) -> Result<Form, TransportError> {
        let mut form = Form::new();

        for part in parts {
            match part {
                FormPart::Text { name, value } => {
                    form = form.text(name.clone(), value.clone());
                }
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    content,
                } => {
                    let part = Part::text(content.clone())
                        .file_name(file_name.clone())
                        .mime_str(content_type)
                        .map_err(|e| {
                            TransportError::Other(format!("Invalid MIME type: {e}"))
                        })?;
                    form = form.part(name.clone(), part);
                }
            }
        }

        Ok(form)
    }
}

impl Transport for FormTransport {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invoke<'a>(&'a self, request: &'a ImportRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            // Same parts, reqwest encoding and boundary.
            let form = Self::build_form(request.form().parts())?;
            let mut builder = self.client.post(request.url().clone());

            // The built content type names a boundary this body does not use.
            for (name, value) in request.headers() {
                if !name.eq_ignore_ascii_case("content-type") {
                    builder = builder.header(name, value);
                }
            }

            let response = builder
                .multipart(form)
                .send()
                .await
                .map_err(|e| map_error(&e, self.timeout))?;

            // Non-2xx ends the chain as a rejection.
            read_response(response).await
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vfimport_domain::{ImportEndpoint, ImportInput};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request_for(server: &MockServer) -> ImportRequest {
        let input = ImportInput::new(json!({"project": {"name": "Demo"}}), "t".repeat(50), "ws-2")
            .validate()
            .unwrap();
        let endpoint = ImportEndpoint::new(&server.uri()).unwrap();
        ImportRequest::build(&endpoint, &input, "fixedboundary", 7).unwrap()
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![FormPart::File {
            name: "file".into(),
            file_name: "a.vf".into(),
            content_type: "not a mime".into(),
            content: "{}".into(),
        }];
        assert!(matches!(
            FormTransport::build_form(&parts),
            Err(TransportError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_sends_form_with_own_boundary() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1alpha1/assistant/import-file/ws-2"))
            .and(header("referer", "https://creator.voiceflow.com/"))
            .and(body_string_contains("name=\"targetSchemaVersion\""))
            .and(body_string_contains("filename=\"Demo-7.vf\""))
            .and(body_string_contains(r#"{"project":{"name":"Demo"}}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p-2"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = FormTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport.invoke(&request_for(&server)).await.unwrap();
        assert_eq!(response, json!({"id": "p-2"}));

        let received = server.received_requests().await.unwrap();
        let content_type = received[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert!(!content_type.contains("fixedboundary"));
    }

    #[tokio::test]
    async fn test_server_error_is_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let transport = FormTransport::new(Duration::from_secs(5)).unwrap();
        let err = transport.invoke(&request_for(&server)).await.unwrap_err();

        assert!(matches!(err, TransportError::Rejected { status: 500, .. }));
    }
}
