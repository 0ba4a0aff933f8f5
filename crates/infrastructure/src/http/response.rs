//! Client setup, error mapping and response decoding.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use vfimport_application::TransportError;

/// Builds a reqwest client that gives up after `timeout`.
///
/// No default user agent is set; the import request carries its own.
///
/// # Errors
///
/// Returns [`TransportError::Unavailable`] if the client cannot be created,
/// for example when no TLS backend is usable.
pub fn build_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| TransportError::Unavailable(e.to_string()))
}

/// Maps reqwest errors to `TransportError`.
#[must_use]
pub fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };
    }

    if error.is_connect() {
        return TransportError::ConnectionFailed(error.to_string());
    }

    if error.is_builder() {
        return TransportError::Unavailable(error.to_string());
    }

    TransportError::Other(error.to_string())
}

/// Reads a response, turning non-success statuses into rejections.
///
/// # Errors
///
/// - [`TransportError::Rejected`] for a non-2xx status
/// - [`TransportError::InvalidResponse`] if the body cannot be read
pub async fn read_response(response: Response) -> Result<Value, TransportError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), url = %response.url(), "Import response received");
    let bytes = response
        .bytes()
        .await
        .map_err(|e| TransportError::InvalidResponse(format!("Failed to read body: {e}")))?;

    if !status.is_success() {
        return Err(TransportError::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok(decode_body(&bytes))
}

/// Decodes a response body.
///
/// JSON is parsed, anything else is kept as a JSON string, and an empty body
/// becomes `null`.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_read_response_logs_status_and_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let url = format!("{}/v1alpha1/assistant/import-file/ws", server.uri());
        let response = build_client(Duration::from_secs(5))
            .unwrap()
            .post(&url)
            .send()
            .await
            .unwrap();
        let err = read_response(response).await.unwrap_err();

        assert!(matches!(err, TransportError::Rejected { status: 403, .. }));
        let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        assert!(output.contains("status=403"));
        assert!(output.contains(&format!("url={url}")));
    }

    #[test]
    fn test_decode_json() {
        assert_eq!(decode_body(br#"{"id":"x"}"#), json!({"id": "x"}));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_body(b"created"), json!("created"));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
    }

    #[test]
    fn test_client_creation() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
