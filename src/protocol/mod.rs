//! Protocol Module
//!
//! The typed-value schema and message codec for the DUT debug-tool
//! protocol.
//!
//! ## Schema
//! A fixed table of 20 value kinds with 1-based positional type codes; each
//! item carries exactly one populated value. Only 9 kinds are settable by
//! this client (see [`SETTABLE_KINDS`]).
//!
//! ## Messages
//! - CONNECT (0x01): request the full parameter snapshot
//! - EDIT (0x02): apply exactly one edited item
//! - VALUE_CHANGED (0x81): snapshot response
//!
//! See [`codec`] for the byte layout.

mod codec;
mod item;
mod value;

pub use codec::{
    decode_item, decode_snapshot, encode_connect, encode_edit, encode_item, encode_snapshot,
    EditRequest, REQUEST_CONNECT, REQUEST_EDIT, RESPONSE_VALUE_CHANGED,
};
pub use item::{Item, Snapshot};
pub use value::{ParamValue, Value, ValueKind, ALL_KINDS, SETTABLE_KINDS};
