//! Configuration for a gdtlink client
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default debug-tool port on the DUT
pub const DEFAULT_PORT: u16 = 9998;

/// Default receive block length in bytes
pub const DEFAULT_BLOCK_LEN: usize = 1024;

/// Main configuration for a gdtlink client instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // DUT Endpoint
    // -------------------------------------------------------------------------
    /// Address of the DUT debug interface
    pub host: String,

    /// TCP port of the DUT debug interface
    pub port: u16,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout
    pub connect_timeout: Duration,

    /// Send timeout (applied as the socket write timeout)
    ///
    /// There is intentionally no receive timeout: a stalled mid-block read
    /// blocks until the peer closes the socket. Known gap carried over from
    /// the protocol's reference client.
    pub send_timeout: Duration,

    /// Receive block length; snapshot payloads are read in blocks of this size
    pub block_len: usize,

    /// Pacing delay slept between successive block reads so the DUT's send
    /// buffer is not overrun. Tunable; throttling only, not scheduling.
    pub pacing_delay: Duration,

    // -------------------------------------------------------------------------
    // Host-side Configuration
    // -------------------------------------------------------------------------
    /// Directory holding persisted value-store cache files
    pub cache_dir: PathBuf,

    /// Network interface to reach the DUT through; also the cache key.
    /// Note: the cache key depends only on the interface, not on `host`.
    pub interface: Option<String>,

    /// Local address to bind/configure on the interface, if any
    pub local_addr: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            send_timeout: Duration::from_secs(5),
            block_len: DEFAULT_BLOCK_LEN,
            pacing_delay: Duration::from_millis(200),
            cache_dir: PathBuf::from("."),
            interface: None,
            local_addr: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The cache key for this configuration (interface name, or "default")
    pub fn cache_key(&self) -> &str {
        self.interface.as_deref().unwrap_or("default")
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the DUT address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the DUT port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the send timeout
    pub fn send_timeout(mut self, timeout: Duration) -> Self {
        self.config.send_timeout = timeout;
        self
    }

    /// Set the receive block length
    pub fn block_len(mut self, len: usize) -> Self {
        self.config.block_len = len;
        self
    }

    /// Set the pacing delay between block reads
    pub fn pacing_delay(mut self, delay: Duration) -> Self {
        self.config.pacing_delay = delay;
        self
    }

    /// Set the cache directory
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = path.into();
        self
    }

    /// Set the network interface name (doubles as the cache key)
    pub fn interface(mut self, name: impl Into<String>) -> Self {
        self.config.interface = Some(name.into());
        self
    }

    /// Set the local address to configure on the interface
    pub fn local_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.local_addr = Some(addr.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
