//! Multipart/form-data encoding.
//!
//! The import endpoint expects the exact framing a browser produces, so the
//! body is assembled by hand instead of being left to an HTTP library.

const CRLF: &str = "\r\n";

/// Escapes a name for a quoted `Content-Disposition` parameter.
///
/// Quotes and line breaks are percent-encoded the way browsers do, so a name
/// cannot end the parameter or the header line early.
fn escape_quoted(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' => out.push_str("%22"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            _ => out.push(c),
        }
    }
    out
}

/// A single named part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file upload.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        file_name: String,
        /// MIME type of the content.
        content_type: String,
        /// File content.
        content: String,
    },
}

impl FormPart {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Text { name, value } => {
                out.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}",
                    escape_quoted(name)
                ));
                out.push_str(value);
            }
            Self::File {
                name,
                file_name,
                content_type,
                content,
            } => {
                out.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
                    escape_quoted(name),
                    escape_quoted(file_name)
                ));
                out.push_str(&format!("Content-Type: {content_type}{CRLF}{CRLF}"));
                out.push_str(content);
            }
        }
        out.push_str(CRLF);
    }
}

/// An ordered multipart form with a fixed boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form using `boundary` as the separator token.
    #[must_use]
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            content: content.into(),
        });
        self
    }

    /// Returns the boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Returns the `Content-Type` header value announcing this form.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encodes the form as a multipart/form-data body.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            out.push_str(&format!("--{}{CRLF}", self.boundary));
            part.write_to(&mut out);
        }
        out.push_str(&format!("--{}--{CRLF}", self.boundary));
        out
    }
}
