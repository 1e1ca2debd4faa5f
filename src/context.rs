//! Host capability context
//!
//! The client does not own interface configuration, test logging, or pacing
//! sleeps; it consumes them through [`HostContext`]. Test harnesses inject
//! their own implementation; [`StdContext`] is the plain-host default.

use std::time::Duration;

use crate::error::Result;

/// Severity levels of the injected log sink
///
/// `Pass`/`Fail` are test-harness verdict levels, distinct from error
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Pass,
    Fail,
    Error,
}

/// Capabilities the surrounding harness provides to the client
pub trait HostContext: Send + Sync {
    /// Prepare the network interface used to reach the DUT
    ///
    /// Called before every connection attempt. `address` is the local
    /// address to use on that interface, when the harness supplies one.
    fn configure(&self, interface: Option<&str>, address: Option<&str>) -> Result<()>;

    /// Emit a message to the harness log sink
    fn log(&self, level: LogLevel, message: &str);

    /// Block for `duration` (pacing between block reads, settle time
    /// before verification reads)
    fn delay(&self, duration: Duration);
}

/// Default context for running against a reachable DUT
///
/// Interface configuration is left to the host OS; `configure` only records
/// the intent. Log messages are forwarded to `tracing`.
#[derive(Debug, Default)]
pub struct StdContext;

impl HostContext for StdContext {
    fn configure(&self, interface: Option<&str>, address: Option<&str>) -> Result<()> {
        tracing::debug!(?interface, ?address, "using host-managed interface configuration");
        Ok(())
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info | LogLevel::Pass => tracing::info!("{message}"),
            LogLevel::Fail => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }

    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
