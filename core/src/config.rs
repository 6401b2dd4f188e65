//! Provider configuration.

use serde::Deserialize;

/// Settings for a [`crate::Provider`].
///
/// Deserializable so a host can embed it in its own configuration file;
/// missing fields fall back to [`Default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Emit a trace of every request and its outcome to the provider's sink.
    pub verbose: bool,
    /// Answer every request with the endpoint's sample data instead of
    /// calling the transport. Requests are still built and validated.
    pub stub: bool,
}

impl ProviderConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn stub(mut self, stub: bool) -> Self {
        self.stub = stub;
        self
    }
}
