//! Request execution.
//!
//! # Design
//! `Provider` composes [`build_request`] with a [`Transport`]. Building happens
//! on the caller's thread so configuration and encoding errors come back
//! before anything is sent. The network round-trip runs on its own tokio
//! task and its result, success or failure, reaches the caller through a
//! single completion callback.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Level;

use crate::builder::build_request;
use crate::config::ProviderConfig;
use crate::endpoint::Endpoint;
use crate::error::{BoxError, NetError, NetResult};
use crate::http::{BuiltRequest, HttpResponse};
use crate::trace::{TraceSink, TracingSink};
use crate::transport::{Transport, TransportResponse};

/// Outcome delivered to the completion callback.
pub type RequestOutcome = Result<HttpResponse, NetError>;

/// Turn what the transport reported into a [`RequestOutcome`].
///
/// A response needs both a status and a body (an empty body counts) to be
/// accepted; anything less is [`NetError::MalformedResponse`].
pub fn classify(raw: Result<TransportResponse, BoxError>) -> RequestOutcome {
    match raw {
        Err(e) => Err(NetError::Transport(e)),
        Ok(TransportResponse {
            status: Some(status),
            headers,
            body: Some(body),
            ..
        }) => Ok(HttpResponse { status, headers, body }),
        Ok(_) => Err(NetError::MalformedResponse),
    }
}

/// Builds endpoints into requests and sends them through a transport.
pub struct Provider<T, S = TracingSink> {
    transport: Arc<T>,
    sink: Arc<S>,
    config: ProviderConfig,
}

impl<T, S> Clone for Provider<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
            config: self.config.clone(),
        }
    }
}

#[cfg(feature = "reqwest")]
impl Provider<crate::transport::ReqwestTransport> {
    /// A provider on a fresh `reqwest` client that traces through `tracing`.
    pub fn with_defaults(config: ProviderConfig) -> Self {
        Self::new(crate::transport::ReqwestTransport::new(), TracingSink, config)
    }
}

impl<T, S> Provider<T, S>
where
    T: Transport + 'static,
    S: TraceSink + 'static,
{
    pub fn new(transport: T, sink: S, config: ProviderConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            sink: Arc::new(sink),
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Build `endpoint` and send it in the background.
    ///
    /// Returns an error, without sending anything, if the request cannot be
    /// built, or [`NetError::Runtime`] when called outside a tokio runtime.
    /// Otherwise `on_complete` runs exactly once on the spawned task.
    pub fn request<E, F>(&self, endpoint: &E, on_complete: F) -> NetResult<JoinHandle<()>>
    where
        E: Endpoint + ?Sized,
        F: FnOnce(RequestOutcome) + Send + 'static,
    {
        let request = build_request(endpoint)?;
        let runtime = Handle::try_current()?;
        let stub = self.config.stub.then(|| endpoint.sample_data());
        let provider = self.clone();
        Ok(runtime.spawn(async move {
            let outcome = provider.execute(request, stub).await;
            on_complete(outcome);
        }))
    }

    /// Build `endpoint`, send it and wait for the outcome.
    pub async fn send<E>(&self, endpoint: &E) -> RequestOutcome
    where
        E: Endpoint + ?Sized,
    {
        let request = build_request(endpoint)?;
        let stub = self.config.stub.then(|| endpoint.sample_data());
        self.execute(request, stub).await
    }

    async fn execute(&self, request: BuiltRequest, stub: Option<Vec<u8>>) -> RequestOutcome {
        let verbose = self.config.verbose;
        if verbose {
            self.sink.emit(Level::INFO, &describe_request(&request));
        }

        let url = request.url.clone();
        let raw = match stub {
            Some(data) => Ok(TransportResponse::new(200, Vec::new(), data)),
            None => self.transport.perform(request).await,
        };
        let final_url = raw
            .as_ref()
            .ok()
            .and_then(|r| r.url.clone())
            .unwrap_or(url);

        let outcome = classify(raw);
        if verbose {
            match &outcome {
                Ok(response) => {
                    self.sink.emit(Level::INFO, &describe_response(&final_url, response))
                }
                Err(e) => self.sink.emit(Level::WARN, &e.to_string()),
            }
        }
        outcome
    }
}

fn describe_request(request: &BuiltRequest) -> String {
    format!(
        "*** Request: {} {}\nHeaders: {:?}\nBody: {}",
        request.method,
        request.url,
        request.headers,
        request.body_text()
    )
}

fn describe_response(url: &str, response: &HttpResponse) -> String {
    format!(
        "*** Response: {} {}\nHeaders: {:?}\nBody: {}",
        url,
        response.status,
        response.headers,
        response.text()
    )
}
