//! Import request construction.

use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::input::ValidatedInput;
use crate::multipart::MultipartForm;

/// Default import host.
pub const DEFAULT_BASE_URL: &str = "https://realtime-api.voiceflow.com";

/// Path prefix of the import route; the workspace id is appended to it.
pub const IMPORT_PATH: &[&str] = &["v1alpha1", "assistant", "import-file"];

/// Schema version the server converts the uploaded project to.
pub const TARGET_SCHEMA_VERSION: &str = "13.03";

/// Form field carrying the project file.
pub const FILE_FIELD: &str = "file";

/// Form field carrying the schema version.
pub const SCHEMA_VERSION_FIELD: &str = "targetSchemaVersion";

/// MIME type of the uploaded project file.
pub const FILE_CONTENT_TYPE: &str = "application/octet-stream";

const ORIGIN: &str = "https://creator.voiceflow.com";
const REFERER: &str = "https://creator.voiceflow.com/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Host serving the import route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEndpoint {
    base: String,
}

impl ImportEndpoint {
    /// Parses a base URL such as `https://realtime-api.voiceflow.com`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if `base` is not an absolute
    /// http(s) URL.
    pub fn new(base: &str) -> DomainResult<Self> {
        parse_base(base)?;
        Ok(Self {
            base: base.to_string(),
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the import URL for a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the base cannot take path
    /// segments.
    pub fn url_for(&self, workspace_id: &str) -> DomainResult<Url> {
        let mut url = parse_base(&self.base)?;
        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(self.base.clone()))?
            .pop_if_empty()
            .extend(IMPORT_PATH)
            .push(workspace_id);
        Ok(url)
    }
}

impl Default for ImportEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn parse_base(base: &str) -> DomainResult<Url> {
    let url = Url::parse(base).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(DomainError::InvalidUrl(format!(
            "URL must start with http:// or https://: {base}"
        )));
    }
    Ok(url)
}

/// A fully built upload, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    file_name: String,
    form: MultipartForm,
    body: String,
    headers: Vec<(String, String)>,
    url: Url,
}

impl ImportRequest {
    /// Builds the upload for a validated input.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the project cannot be serialized or the
    /// URL cannot be built.
    pub fn build(
        endpoint: &ImportEndpoint,
        input: &ValidatedInput,
        boundary: &str,
        unix_millis: i64,
    ) -> DomainResult<Self> {
        let file_name = input.project.file_name(unix_millis);
        let content = input.project.to_json()?;

        let form = MultipartForm::new(boundary)
            .file(FILE_FIELD, file_name.as_str(), FILE_CONTENT_TYPE, content)
            .text(SCHEMA_VERSION_FIELD, TARGET_SCHEMA_VERSION);
        let body = form.encode();

        let headers = vec![
            ("accept".to_string(), "*/*".to_string()),
            ("accept-language".to_string(), "en-US,en;q=0.9".to_string()),
            (
                "authorization".to_string(),
                format!("Bearer {}", input.auth_token),
            ),
            ("content-type".to_string(), form.content_type()),
            ("origin".to_string(), ORIGIN.to_string()),
            ("referer".to_string(), REFERER.to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ];

        Ok(Self {
            file_name,
            url: endpoint.url_for(&input.workspace_id)?,
            form,
            body,
            headers,
        })
    }

    /// Name of the uploaded file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Structured parts the body was encoded from.
    #[must_use]
    pub const fn form(&self) -> &MultipartForm {
        &self.form
    }

    /// Encoded multipart body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Boundary separating the body's parts.
    #[must_use]
    pub fn boundary(&self) -> &str {
        self.form.boundary()
    }

    /// Request headers in send order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}
