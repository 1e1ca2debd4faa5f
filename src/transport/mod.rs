//! Transport Module
//!
//! Length-prefixed framing over one-shot TCP connections.
//!
//! ## Wire Framing
//! ```text
//! ┌─────────────────────┬───────┬─────────────────────┐
//! │ ASCII decimal length │ ' '  │     raw payload     │
//! └─────────────────────┴───────┴─────────────────────┘
//! ```
//! Requests and responses use the same framing. Connections are never
//! reused across calls.

mod channel;

pub use channel::{read_frame, write_frame, TransportChannel, HEADER_LEN};
