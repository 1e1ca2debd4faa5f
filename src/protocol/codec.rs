//! Message codec
//!
//! Encoding and decoding functions for the debug-tool message payloads.
//! These are the bytes carried inside the length-prefixed frame; framing
//! itself lives in the transport module.
//!
//! ## Payload Format
//!
//! ### Request
//! ```text
//! ┌──────────┬───────────┬─────────────────────────────┐
//! │ Kind (1) │ Count (4) │          Entries            │
//! └──────────┴───────────┴─────────────────────────────┘
//! ```
//! - 0x01 CONNECT: entries are connection ids (`u32` len + bytes); a
//!   snapshot request carries exactly one empty id placeholder
//! - 0x02 EDIT: entries are edited items; always exactly one
//!
//! ### Response
//! ```text
//! ┌──────────┬───────────┬─────────────────────────────┐
//! │ 0x81 (1) │ Count (4) │           Items             │
//! └──────────┴───────────┴─────────────────────────────┘
//! ```
//!
//! ### Item
//! `u32` id length + id UTF-8 + `u8` type code + value payload. Strings are
//! `u32` length + UTF-8, integers are big-endian at their declared width,
//! doubles are IEEE-754 bits, container kinds are `u32` length + opaque
//! bytes, timeVal is `i64` seconds + `i32` microseconds.

use bytes::{Buf, BufMut};

use super::item::{Item, Snapshot};
use super::value::{Value, ValueKind};
use crate::error::{GdtError, Result};

/// Request kind: connect and fetch a full snapshot
pub const REQUEST_CONNECT: u8 = 0x01;

/// Request kind: apply edited items
pub const REQUEST_EDIT: u8 = 0x02;

/// Response kind: full value-changed snapshot
pub const RESPONSE_VALUE_CHANGED: u8 = 0x81;

// =============================================================================
// Edit Request
// =============================================================================

/// An outgoing edit carrying exactly one edited item
///
/// The protocol allows at most one outstanding edit per request; staging a
/// new item displaces whatever was staged before, so the invariant cannot be
/// broken by reuse.
#[derive(Debug, Clone)]
pub struct EditRequest {
    item: Item,
}

impl EditRequest {
    /// Build a request around a single edited item
    pub fn new(item: Item) -> Self {
        Self { item }
    }

    /// Replace the staged edit, returning the displaced item
    pub fn stage(&mut self, item: Item) -> Item {
        std::mem::replace(&mut self.item, item)
    }

    /// The currently staged item
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Encode the request payload
    pub fn encode(&self) -> Vec<u8> {
        encode_edit(&self.item)
    }
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a connect request (one empty connection-id entry, asks the DUT
/// for its full snapshot)
pub fn encode_connect() -> Vec<u8> {
    let mut buf = Vec::with_capacity(9);
    buf.put_u8(REQUEST_CONNECT);
    buf.put_u32(1);
    buf.put_u32(0); // empty id placeholder
    buf
}

/// Encode an edit request carrying exactly one item
pub fn encode_edit(item: &Item) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.put_u8(REQUEST_EDIT);
    buf.put_u32(1);
    encode_item(&mut buf, item);
    buf
}

/// Encode a value-changed response payload (stub servers and benches)
pub fn encode_snapshot(snapshot: &Snapshot) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.put_u8(RESPONSE_VALUE_CHANGED);
    buf.put_u32(snapshot.items.len() as u32);
    for item in &snapshot.items {
        encode_item(&mut buf, item);
    }
    buf
}

/// Encode a single item into `buf`
pub fn encode_item(buf: &mut Vec<u8>, item: &Item) {
    buf.put_u32(item.id.len() as u32);
    buf.put_slice(item.id.as_bytes());
    buf.put_u8(item.type_code);

    match &item.value {
        Value::Unknown(s)
        | Value::Text(s)
        | Value::Udid(s)
        | Value::Ipv4(s)
        | Value::Eui48(s)
        | Value::Ipv6(s)
        | Value::Multi(s) => {
            buf.put_u32(s.len() as u32);
            buf.put_slice(s.as_bytes());
        }
        Value::Bool(b) => buf.put_u8(u8::from(*b)),
        Value::Interval(v) | Value::Enum(v) => buf.put_i32(*v),
        Value::UInterval(v) => buf.put_u32(*v),
        Value::UllInterval(v) => buf.put_u64(*v),
        Value::LlInterval(v) => buf.put_i64(*v),
        Value::SInterval(v) => buf.put_i16(*v),
        Value::UsInterval(v) => buf.put_u16(*v),
        Value::DInterval(v) => buf.put_f64(*v),
        Value::Container(b) | Value::AddToContainer(b) | Value::RemoveFromContainer(b) => {
            buf.put_u32(b.len() as u32);
            buf.put_slice(b);
        }
        Value::TimeVal { secs, micros } => {
            buf.put_i64(*secs);
            buf.put_i32(*micros);
        }
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a value-changed response payload into a snapshot
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    let mut buf = bytes;

    let kind = take_u8(&mut buf)?;
    if kind != RESPONSE_VALUE_CHANGED {
        return Err(GdtError::Decode(format!(
            "unexpected message kind 0x{kind:02x}, expected 0x{RESPONSE_VALUE_CHANGED:02x}"
        )));
    }

    let count = take_u32(&mut buf)? as usize;
    let mut items = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        items.push(decode_item(&mut buf)?);
    }

    if buf.has_remaining() {
        return Err(GdtError::Decode(format!(
            "{} trailing bytes after {count} items",
            buf.remaining()
        )));
    }

    Ok(Snapshot::new(items))
}

/// Decode a single item, advancing `buf` past it
pub fn decode_item(buf: &mut &[u8]) -> Result<Item> {
    let id = take_string(buf)?;
    let type_code = take_u8(buf)?;
    let kind = ValueKind::from_code(type_code)?;

    let value = match kind {
        ValueKind::Unknown => Value::Unknown(take_string(buf)?),
        ValueKind::Bool => Value::Bool(take_u8(buf)? != 0),
        ValueKind::Text => Value::Text(take_string(buf)?),
        ValueKind::Interval => Value::Interval(take_i32(buf)?),
        ValueKind::Enum => Value::Enum(take_i32(buf)?),
        ValueKind::UInterval => Value::UInterval(take_u32(buf)?),
        ValueKind::UllInterval => Value::UllInterval(take_u64(buf)?),
        ValueKind::Udid => Value::Udid(take_string(buf)?),
        ValueKind::LlInterval => Value::LlInterval(take_i64(buf)?),
        ValueKind::SInterval => {
            need(buf, 2)?;
            Value::SInterval(buf.get_i16())
        }
        ValueKind::UsInterval => {
            need(buf, 2)?;
            Value::UsInterval(buf.get_u16())
        }
        ValueKind::Ipv4 => Value::Ipv4(take_string(buf)?),
        ValueKind::Eui48 => Value::Eui48(take_string(buf)?),
        ValueKind::Ipv6 => Value::Ipv6(take_string(buf)?),
        ValueKind::Multi => Value::Multi(take_string(buf)?),
        ValueKind::DInterval => {
            need(buf, 8)?;
            Value::DInterval(buf.get_f64())
        }
        ValueKind::Container => Value::Container(take_bytes(buf)?),
        ValueKind::AddToContainer => Value::AddToContainer(take_bytes(buf)?),
        ValueKind::RemoveFromContainer => Value::RemoveFromContainer(take_bytes(buf)?),
        ValueKind::TimeVal => {
            let secs = take_i64(buf)?;
            need(buf, 4)?;
            Value::TimeVal {
                secs,
                micros: buf.get_i32(),
            }
        }
    };

    Ok(Item {
        id,
        type_code,
        value,
    })
}

// =============================================================================
// Checked Buffer Reads
// =============================================================================

fn need(buf: &&[u8], len: usize) -> Result<()> {
    if buf.remaining() < len {
        return Err(GdtError::Decode(format!(
            "truncated payload: need {len} bytes, {} remaining",
            buf.remaining()
        )));
    }
    Ok(())
}

fn take_u8(buf: &mut &[u8]) -> Result<u8> {
    need(buf, 1)?;
    Ok(buf.get_u8())
}

fn take_i32(buf: &mut &[u8]) -> Result<i32> {
    need(buf, 4)?;
    Ok(buf.get_i32())
}

fn take_u32(buf: &mut &[u8]) -> Result<u32> {
    need(buf, 4)?;
    Ok(buf.get_u32())
}

fn take_i64(buf: &mut &[u8]) -> Result<i64> {
    need(buf, 8)?;
    Ok(buf.get_i64())
}

fn take_u64(buf: &mut &[u8]) -> Result<u64> {
    need(buf, 8)?;
    Ok(buf.get_u64())
}

fn take_bytes(buf: &mut &[u8]) -> Result<Vec<u8>> {
    let len = take_u32(buf)? as usize;
    need(buf, len)?;
    let bytes = buf[..len].to_vec();
    buf.advance(len);
    Ok(bytes)
}

fn take_string(buf: &mut &[u8]) -> Result<String> {
    let bytes = take_bytes(buf)?;
    String::from_utf8(bytes).map_err(|e| GdtError::Decode(format!("invalid UTF-8 string: {e}")))
}
