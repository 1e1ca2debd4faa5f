//! # gdtlink
//!
//! A synchronous TCP client for the gateway debug-tool parameter protocol:
//! - Length-prefixed binary framing with paced, chunked receives
//! - A fixed 20-kind typed-value schema (9 kinds settable)
//! - A persisted value-store cache keyed by network interface
//! - Get/set/type-lookup with pre-send value validation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ParameterClient                          │
//! │            (get / set / type lookup, validation)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      ValueStore                              │
//! │             (cache-or-refresh resolution)                    │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!    ┌──────────────┐              ┌─────────────────┐
//!    │  Cache File  │              │ TransportChannel │
//!    │  (versioned) │              │  (framed TCP)    │
//!    └──────────────┘              └────────┬────────┘
//!                                           │
//!                                           ▼
//!                                   ┌──────────────┐
//!                                   │ MessageCodec │
//!                                   │  (snapshot)  │
//!                                   └──────────────┘
//! ```
//!
//! Each call opens and closes its own socket; there is no connection reuse,
//! no concurrency, and no automatic retry. Host-owned capabilities
//! (interface configuration, verdict logging, pacing sleeps) are injected
//! through [`HostContext`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod context;
pub mod protocol;
pub mod transport;
pub mod store;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::{validate_value, ParameterClient, SetOutcome};
pub use config::Config;
pub use context::{HostContext, LogLevel, StdContext};
pub use error::{GdtError, Result};
pub use protocol::{Item, ParamValue, Snapshot, Value, ValueKind};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gdtlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
