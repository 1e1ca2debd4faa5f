//! Cache entry persistence
//!
//! One file per cache key, fully overwritten on write, no locking. Two
//! client instances sharing a key can race on read-modify-write; documented
//! constraint, not remediated here.
//!
//! ## File Layout
//! ```text
//! ┌───────────┬──────────────┬────────────┬──────────────────┐
//! │ "GDTC" (4) │ version (4) │  crc32 (4) │  bincode payload │
//! └───────────┴──────────────┴────────────┴──────────────────┘
//! ```
//! The CRC covers the bincode payload. Any read failure — missing file, bad
//! magic, version skew, checksum mismatch, undecodable payload — collapses
//! to `CacheMiss`; the caller falls back to a network fetch either way.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GdtError, Result};
use crate::protocol::Snapshot;

const MAGIC: &[u8; 4] = b"GDTC";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 12;

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    key: &'a str,
    snapshot: &'a Snapshot,
}

#[derive(Deserialize)]
struct CacheEntry {
    key: String,
    snapshot: Snapshot,
}

/// Write a cache entry, overwriting any previous one
pub fn write_entry(path: &Path, key: &str, snapshot: &Snapshot) -> Result<()> {
    let body = bincode::serialize(&CacheEntryRef { key, snapshot })
        .map_err(|e| GdtError::Storage(format!("serialize cache entry: {e}")))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_be_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&body).to_be_bytes());
    bytes.extend_from_slice(&body);

    fs::write(path, bytes).map_err(|e| GdtError::Storage(format!("{}: {e}", path.display())))
}

/// Read a cache entry; every failure mode is a `CacheMiss`
pub fn read_entry(path: &Path, key: &str) -> Result<Snapshot> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), "cache entry unreadable: {e}");
            return Err(miss(key));
        }
    };

    if bytes.len() < HEADER_LEN || &bytes[..4] != MAGIC {
        tracing::debug!(path = %path.display(), "cache entry has bad magic");
        return Err(miss(key));
    }

    let version = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != VERSION {
        tracing::debug!(path = %path.display(), version, "cache entry version skew");
        return Err(miss(key));
    }

    let crc = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let body = &bytes[HEADER_LEN..];
    if crc32fast::hash(body) != crc {
        tracing::debug!(path = %path.display(), "cache entry failed checksum");
        return Err(miss(key));
    }

    let entry: CacheEntry = match bincode::deserialize(body) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!(path = %path.display(), "cache entry undecodable: {e}");
            return Err(miss(key));
        }
    };

    if entry.key != key {
        tracing::debug!(path = %path.display(), stored = %entry.key, "cache entry keyed for another interface");
        return Err(miss(key));
    }

    Ok(entry.snapshot)
}

fn miss(key: &str) -> GdtError {
    GdtError::CacheMiss(key.to_string())
}
