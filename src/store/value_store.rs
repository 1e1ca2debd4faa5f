//! Value store
//!
//! Resolves parameter items from the local cache or a fresh network fetch.
//!
//! ## Refresh Policy
//! - forced refresh: fetch from the DUT, persist, then search
//! - cached-first: load the persisted snapshot; on a miss, fall back to a
//!   network fetch WITHOUT persisting the result. The asymmetry is inherited
//!   from the protocol's reference client; see DESIGN.md before changing it.
//! - a search miss invalidates the cache entry so a stale snapshot cannot
//!   keep answering for a renamed or removed parameter

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::context::{HostContext, LogLevel};
use crate::error::{GdtError, Result};
use crate::protocol::{self, Item, Snapshot};
use crate::transport::TransportChannel;

use super::cache;

/// Local snapshot cache keyed by network-interface identifier
///
/// The key deliberately excludes the DUT address: two DUTs reached over the
/// same interface share an entry. Documented limitation.
pub struct ValueStore {
    cache_dir: PathBuf,
}

impl ValueStore {
    /// Create a store rooted at `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Fetch a fresh snapshot from the DUT
    ///
    /// Configures the interface, opens a one-shot channel, sends a connect
    /// request, and decodes the framed response.
    pub fn fetch_fresh(&self, config: &Config, ctx: &dyn HostContext) -> Result<Snapshot> {
        ctx.configure(config.interface.as_deref(), config.local_addr.as_deref())?;

        let mut channel = TransportChannel::open(config)?;
        channel.send_framed(&protocol::encode_connect())?;
        let raw = channel.receive_framed(ctx)?;

        let snapshot = protocol::decode_snapshot(&raw)?;
        tracing::debug!(items = snapshot.len(), "fetched fresh snapshot");
        Ok(snapshot)
    }

    /// Load the persisted snapshot for `key`
    pub fn load_cached(&self, key: &str) -> Result<Snapshot> {
        cache::read_entry(&self.entry_path(key), key)
    }

    /// Persist `snapshot` for `key`, overwriting any previous entry
    ///
    /// Failures are logged and returned, but callers treat them as
    /// non-fatal.
    pub fn store(&self, key: &str, snapshot: &Snapshot) -> Result<()> {
        if let Err(e) = fs::create_dir_all(&self.cache_dir) {
            let err = GdtError::Storage(format!("{}: {e}", self.cache_dir.display()));
            tracing::warn!("cannot create cache directory: {err}");
            return Err(err);
        }

        let path = self.entry_path(key);
        match cache::write_entry(&path, key, snapshot) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), items = snapshot.len(), "persisted snapshot");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("cannot persist snapshot: {e}");
                Err(e)
            }
        }
    }

    /// Delete the persisted entry for `key`; failure is logged and ignored
    pub fn invalidate(&self, key: &str) {
        let path = self.entry_path(key);
        if let Err(e) = fs::remove_file(&path) {
            tracing::debug!(path = %path.display(), "cache invalidation skipped: {e}");
        }
    }

    /// Resolve one item by id, per the refresh policy above
    pub fn resolve_item(
        &self,
        id: &str,
        key: &str,
        force_fresh: bool,
        config: &Config,
        ctx: &dyn HostContext,
    ) -> Result<Item> {
        let snapshot = if force_fresh {
            let snapshot = self.fetch_fresh(config, ctx)?;
            if let Err(e) = self.store(key, &snapshot) {
                // Non-fatal on this path, but still reported to the harness.
                ctx.log(
                    LogLevel::Error,
                    &format!("failed to persist value store for '{key}': {e}"),
                );
            }
            snapshot
        } else {
            match self.load_cached(key) {
                Ok(snapshot) => snapshot,
                Err(GdtError::CacheMiss(_)) => {
                    ctx.log(LogLevel::Debug, &format!("cache miss for '{key}', fetching"));
                    // Fallback fetches are not persisted.
                    self.fetch_fresh(config, ctx)?
                }
                Err(e) => return Err(e),
            }
        };

        match snapshot.find(id) {
            Some(item) => Ok(item.clone()),
            None => {
                self.invalidate(key);
                ctx.log(
                    LogLevel::Fail,
                    &format!("parameter '{id}' not found in the snapshot"),
                );
                Err(GdtError::ItemNotFound(id.to_string()))
            }
        }
    }

    /// Path of the persisted entry for `key`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("vs_{key}.bin"))
    }
}
