//! TTL-based caching for the policy table.

use super::error::PolicyConfigError;
use super::types::PolicyTable;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A loaded policy table with metadata.
struct CachedPolicy {
    /// The loaded table
    table: Arc<PolicyTable>,
    /// When the table was loaded (or last checked)
    loaded_at: Instant,
}

/// Thread-safe holder for the policy table backing a policy file.
///
/// The table is re-read from disk once the TTL has elapsed. A failed re-read
/// keeps the last good table, so an edit that breaks the file does not blank
/// out policy text on every page.
pub struct PolicyStore {
    path: PathBuf,
    entry: RwLock<Option<CachedPolicy>>,
    ttl: Duration,
}

impl PolicyStore {
    /// Creates an empty store for the given file. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            entry: RwLock::new(None),
            ttl,
        }
    }

    /// Creates a store with a 5-minute TTL.
    pub fn with_default_ttl(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Duration::from_secs(5 * 60))
    }

    /// Path of the backing policy file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the policy table, reloading it if the cached copy has expired.
    ///
    /// Returns `None` only if the file has never been loaded successfully.
    pub fn get(&self) -> Option<Arc<PolicyTable>> {
        if let Ok(guard) = self.entry.read() {
            if let Some(entry) = guard.as_ref() {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Some(entry.table.clone());
                }
            }
        }

        match self.reload() {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("Failed to reload policy table, keeping last loaded copy: {}", e);
                self.touch();
                self.cached()
            }
        }
    }

    /// Forces a reload from disk, replacing the cached table on success.
    pub fn reload(&self) -> Result<Arc<PolicyTable>, PolicyConfigError> {
        let table = Arc::new(PolicyTable::load_from_file(&self.path)?);

        info!(
            "Loaded policy table from {} ({} refund, {} reschedule entries)",
            self.path.display(),
            table.refund_policy.len(),
            table.reschedule_policy.len()
        );

        if let Ok(mut guard) = self.entry.write() {
            *guard = Some(CachedPolicy {
                table: table.clone(),
                loaded_at: Instant::now(),
            });
        }

        Ok(table)
    }

    /// Returns the cached table regardless of age, without touching the file.
    pub fn cached(&self) -> Option<Arc<PolicyTable>> {
        self.entry
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|entry| entry.table.clone()))
    }

    /// Drops the cached table. The next [`PolicyStore::get`] reads the file again.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = None;
        }
    }

    /// Returns true if a table is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.cached().is_some()
    }

    /// Restarts the TTL of a stale entry so a broken file is not re-read on every call.
    fn touch(&self) {
        if let Ok(mut guard) = self.entry.write() {
            if let Some(entry) = guard.as_mut() {
                entry.loaded_at = Instant::now();
            }
        }
    }
}
