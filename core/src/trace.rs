//! Diagnostic sinks for verbose request tracing.
//!
//! The provider never logs on its own; it writes request/response traces to
//! whichever sink it was built with. `TracingSink` forwards to the `tracing`
//! facade so the host's subscriber decides where lines end up.

use tracing::Level;

/// A destination for human-readable trace lines. Must not fail or block.
pub trait TraceSink: Send + Sync {
    fn emit(&self, level: Level, message: &str);
}

/// Forwards trace lines to `tracing` under the `netkit::provider` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "netkit::provider", "{message}"),
            Level::WARN => tracing::warn!(target: "netkit::provider", "{message}"),
            Level::INFO => tracing::info!(target: "netkit::provider", "{message}"),
            Level::DEBUG => tracing::debug!(target: "netkit::provider", "{message}"),
            _ => tracing::trace!(target: "netkit::provider", "{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn emit(&self, _level: Level, _message: &str) {}
}
