//! The network seam.
//!
//! # Design
//! A `Transport` performs one request and reports what came back without
//! judging it: status, headers and body are all optional so that a transport
//! can describe a half-finished exchange. The provider decides what counts
//! as a usable response. HTTP error statuses are responses, not errors.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::{BuiltRequest, Headers};

/// Raw outcome of a successful round-trip as the transport saw it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// `None` when the reply could not be read as an HTTP response.
    pub status: Option<u16>,
    /// Final URL after any redirects the transport followed.
    pub url: Option<String>,
    pub headers: Headers,
    /// `None` when no body was delivered. An empty body is `Some(vec![])`.
    pub body: Option<Vec<u8>>,
}

impl TransportResponse {
    pub fn new(status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status: Some(status),
            url: None,
            headers,
            body: Some(body),
        }
    }
}

/// Performs HTTP requests. Implementations own connection reuse, timeouts
/// and TLS.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: BuiltRequest) -> Result<TransportResponse, BoxError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::*;
    use crate::http::HttpMethod;

    /// Transport backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn perform(&self, request: BuiltRequest) -> Result<TransportResponse, BoxError> {
            let mut builder = self.client.request(method(request.method), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let url = response.url().to_string();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| {
                    let v = v.to_str().ok()?;
                    Some((k.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.bytes().await?.to_vec();

            Ok(TransportResponse {
                status: Some(status),
                url: Some(url),
                headers,
                body: Some(body),
            })
        }
    }
}
