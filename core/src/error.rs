//! Error types for building and executing requests.
//!
//! # Design
//! Builder failures (`Configuration`, `Encoding`) are returned synchronously
//! and stop the call before anything reaches the transport. Execution
//! failures (`Transport`, `MalformedResponse`) travel through the same
//! completion channel as a successful response. `Runtime` is returned
//! synchronously when there is no executor to run the request on.

use thiserror::Error;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type NetResult<T> = Result<T, NetError>;

#[derive(Debug, Error)]
pub enum NetError {
    /// `base_url + path` is not an absolute URL.
    #[error("invalid URL: {url:?}")]
    Configuration { url: String },

    /// Parameters could not be serialized by the selected encoding.
    #[error("parameter encoding failed: {0}")]
    Encoding(String),

    /// The transport failed before a response was produced.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The transport returned without an HTTP status or without a body.
    #[error("malformed response")]
    MalformedResponse,

    /// A background request was started outside a tokio runtime.
    #[error("no tokio runtime: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

impl NetError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, NetError::Configuration { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, NetError::Transport(_))
    }
}

impl From<serde_json::Error> for NetError {
    fn from(e: serde_json::Error) -> Self {
        NetError::Encoding(e.to_string())
    }
}
