//! Single-file `multipart/form-data` bodies.

use uuid::Uuid;

pub const DEFAULT_MIME_TYPE: &str = "image/jpg";
const FILE_FIELD: &str = "file";
const FILE_NAME: &str = "file";

/// A multipart boundary token. A fresh one is generated for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(String);

impl Boundary {
    pub fn generate() -> Self {
        Boundary(format!("Boundary-{}", Uuid::new_v4().hyphenated().to_string().to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A `multipart/form-data` payload with optional text fields followed by
/// exactly one file part named `file`.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: Boundary,
    fields: Vec<(String, String)>,
    file: Vec<u8>,
    mime_type: String,
}

impl MultipartForm {
    pub fn new(file: impl Into<Vec<u8>>) -> Self {
        Self::with_boundary(Boundary::generate(), file)
    }

    pub fn with_boundary(boundary: Boundary, file: impl Into<Vec<u8>>) -> Self {
        Self {
            boundary,
            fields: Vec::new(),
            file: file.into(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }

    /// Add a text field, written before the file part.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary.as_str())
    }

    /// Serialize the form. The closing delimiter has no trailing CRLF.
    pub fn to_bytes(&self) -> Vec<u8> {
        let boundary = self.boundary.as_str();
        let prefix = format!("--{boundary}\r\n");
        let mut body = Vec::with_capacity(self.file.len() + 256);

        for (name, value) in &self.fields {
            body.extend_from_slice(prefix.as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            body.extend_from_slice(format!("{value}\r\n").as_bytes());
        }

        body.extend_from_slice(prefix.as_bytes());
        let disposition = format!(
            "Content-Disposition: form-data; name=\"{FILE_FIELD}\"; \
             filename=\"{FILE_NAME}\"\r\n"
        );
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.mime_type).as_bytes());
        body.extend_from_slice(&self.file);
        body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
        body
    }
}
