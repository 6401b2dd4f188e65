//! Declarative endpoints turned into HTTP requests.
//!
//! # Overview
//! Callers describe an API call as an [`Endpoint`]: base URL, path, method,
//! headers and a [`BodyStrategy`]. [`build_request`] turns that description
//! into a [`BuiltRequest`] without touching the network, and [`Provider`]
//! sends it through a [`Transport`], delivering a [`RequestOutcome`].
//!
//! # Design
//! - The builder is pure; only the multipart boundary is random.
//! - Build errors (`Configuration`, `Encoding`) are returned before any I/O.
//! - Transport and malformed-response errors arrive through the same
//!   completion path as successes.
//! - Verbose tracing goes through an injected [`TraceSink`], never a global.

pub mod builder;
pub mod config;
pub mod encoding;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod multipart;
pub mod provider;
pub mod trace;
pub mod transport;

pub use builder::build_request;
pub use config::ProviderConfig;
pub use encoding::{encode_query, parse_query, EncodingKind};
pub use endpoint::{to_parameters, BodyStrategy, Endpoint, EndpointDescriptor, Parameters};
pub use error::{BoxError, NetError, NetResult};
pub use http::{BuiltRequest, Headers, HttpMethod, HttpResponse};
pub use multipart::{Boundary, MultipartForm};
pub use provider::{classify, Provider, RequestOutcome};
pub use trace::{NoopSink, TraceSink, TracingSink};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{Transport, TransportResponse};
