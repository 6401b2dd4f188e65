//! Declarative endpoint descriptions.
//!
//! # Design
//! An API is modelled as a set of targets, each answering the same questions:
//! where does it live, which method, which headers, how is the body built.
//! `Endpoint` is that contract; callers usually implement it on an enum with
//! one variant per API call. `EndpointDescriptor` is a plain-value
//! implementation for one-off calls and tests.

use serde::Serialize;

use crate::encoding::EncodingKind;
use crate::error::{NetError, NetResult};
use crate::http::{Headers, HttpMethod};

/// Key/value parameters. Values may be scalars, arrays or nested objects.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Convert any serializable value into [`Parameters`].
///
/// Fails with [`NetError::Encoding`] if serialization fails or the value is
/// not a key/value mapping (a struct, map or `json!({..})` object).
pub fn to_parameters<T: Serialize + ?Sized>(value: &T) -> NetResult<Parameters> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(NetError::Encoding(format!(
            "parameters must be a key/value mapping, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// How the body (and possibly the query string) of a request is built.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyStrategy {
    /// No body.
    Plain,

    /// Body is exactly these bytes.
    RawData(Vec<u8>),

    /// Parameters serialized by the given encoding, into either the query
    /// string or the body.
    EncodedParameters {
        parameters: Parameters,
        encoding: EncodingKind,
    },

    /// Body bytes sent verbatim, with `url_parameters` encoded into the query
    /// string.
    CompositeData {
        body: Vec<u8>,
        url_parameters: Parameters,
    },

    /// A single-file `multipart/form-data` upload.
    MultipartUpload(Vec<u8>),
}

/// Description of one API call.
pub trait Endpoint {
    /// Absolute base URL, e.g. `https://api.example.com`.
    fn base_url(&self) -> &str;

    /// Appended to [`base_url`](Endpoint::base_url) as-is. Include the
    /// leading slash.
    fn path(&self) -> String;

    fn method(&self) -> HttpMethod;

    fn body(&self) -> BodyStrategy;

    fn headers(&self) -> Option<Headers> {
        None
    }

    /// Canned response body returned by a stubbed provider.
    fn sample_data(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// A ready-made [`Endpoint`] value.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    pub base_url: String,
    pub path: String,
    pub method: HttpMethod,
    pub headers: Option<Headers>,
    pub body: BodyStrategy,
    pub sample_data: Vec<u8>,
}

impl EndpointDescriptor {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            headers: None,
            body: BodyStrategy::Plain,
            sample_data: Vec::new(),
        }
    }

    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, HttpMethod::Get)
    }

    pub fn post(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_url, path, HttpMethod::Post)
    }

    /// Add a header. Headers are kept in insertion order.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: BodyStrategy) -> Self {
        self.body = body;
        self
    }

    pub fn sample_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.sample_data = data.into();
        self
    }
}

impl Endpoint for EndpointDescriptor {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn body(&self) -> BodyStrategy {
        self.body.clone()
    }

    fn headers(&self) -> Option<Headers> {
        self.headers.clone()
    }

    fn sample_data(&self) -> Vec<u8> {
        self.sample_data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Search {
        q: String,
        page: u32,
    }

    #[test]
    fn to_parameters_accepts_structs() {
        let params = to_parameters(&Search { q: "rust".to_string(), page: 2 }).unwrap();
        assert_eq!(params["q"], "rust");
        assert_eq!(params["page"], 2);
    }

    #[test]
    fn to_parameters_rejects_non_mappings() {
        let err = to_parameters(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, NetError::Encoding(ref m) if m.contains("an array")));
        let err = to_parameters(&json!("text")).unwrap_err();
        assert!(matches!(err, NetError::Encoding(_)));
    }

    #[test]
    fn to_parameters_rejects_unserializable_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "tuple key");
        let err = to_parameters(&map).unwrap_err();
        assert!(matches!(err, NetError::Encoding(_)));
    }

    #[test]
    fn descriptor_builder_collects_headers_in_order() {
        let d = EndpointDescriptor::get("https://api.example.com", "/items")
            .header("Accept", "application/json")
            .header("X-Trace", "1");
        assert_eq!(
            Endpoint::headers(&d).unwrap(),
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(Endpoint::body(&d), BodyStrategy::Plain);
        assert!(Endpoint::sample_data(&d).is_empty());
    }

    enum Api {
        User(u32),
    }

    impl Endpoint for Api {
        fn base_url(&self) -> &str {
            "https://api.example.com"
        }

        fn path(&self) -> String {
            match self {
                Api::User(id) => format!("/users/{id}"),
            }
        }

        fn method(&self) -> HttpMethod {
            HttpMethod::Get
        }

        fn body(&self) -> BodyStrategy {
            BodyStrategy::Plain
        }
    }

    #[test]
    fn enum_targets_use_trait_defaults() {
        let target = Api::User(7);
        assert_eq!(target.path(), "/users/7");
        assert!(target.headers().is_none());
        assert!(target.sample_data().is_empty());
    }
}
