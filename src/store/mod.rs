//! Value Store Module
//!
//! Snapshot caching and the cache-or-refresh resolution policy.
//!
//! ## Layout
//! One versioned, checksummed cache file per network-interface key under
//! the configured cache directory (`vs_<key>.bin`). Entries are written
//! whole and never locked.

mod cache;
mod value_store;

pub use value_store::ValueStore;
