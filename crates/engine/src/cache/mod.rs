//! Background-refreshing resource cache.
//!
//! Modules:
//! - `fetch`: fetcher trait and the kubectl-backed fetcher
//! - `null`: fetcher that always returns an empty list
//!
//! [`ResourceCache::read`] returns the current snapshot for a key without
//! waiting on I/O. When the snapshot is older than the TTL it schedules a
//! refresh on the injected runtime; at most one refresh per key is in flight.

mod fetch;
mod null;

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use kubeline_types::{CacheKey, Snapshot, Suggestion};
use tokio::{runtime::Handle, time::Instant};
use tracing::{debug, info, warn};

pub use fetch::{FetchError, KubectlFetcher, ResourceFetcher};
pub use null::NullFetcher;

pub const DEFAULT_TTL: Duration = Duration::from_secs(10);
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum age at which a snapshot is served without scheduling a refresh.
    pub ttl: Duration,
    /// Upper bound on a single fetch. A fetch that runs longer is abandoned
    /// and treated as failed.
    pub refresh_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    snapshot: RwLock<Snapshot>,
    last_fetched_at: Mutex<Option<Instant>>,
    refreshing: AtomicBool,
    /// Bumped by every invalidation. A refresh started under an older
    /// generation neither installs its result nor marks the entry fresh.
    generation: AtomicU64,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::from(Vec::<Suggestion>::new())),
            last_fetched_at: Mutex::new(None),
            refreshing: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn invalidate(&self) {
        let mut last_fetched_at = self.last_fetched_at.lock().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);
        *last_fetched_at = None;
    }

    fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    fn is_stale(&self, ttl: Duration, now: Instant) -> bool {
        match *self.last_fetched_at.lock().unwrap_or_else(PoisonError::into_inner) {
            Some(fetched_at) => now.saturating_duration_since(fetched_at) > ttl,
            None => true,
        }
    }
}

/// Owns the `refreshing` claim for one entry. Dropping it records the fetch
/// time and releases the claim, so a cancelled or panicking refresh task
/// cannot leave the entry stuck. The fetch time is only recorded when the
/// entry was not invalidated while the claim was held.
struct RefreshClaim {
    entry: Arc<CacheEntry>,
    generation: u64,
}

impl RefreshClaim {
    fn new(entry: Arc<CacheEntry>) -> Self {
        let generation = entry.generation();
        Self { entry, generation }
    }

    fn is_current(&self) -> bool {
        self.entry.generation() == self.generation
    }
}

impl Drop for RefreshClaim {
    fn drop(&mut self) {
        {
            let mut last_fetched_at = self.entry.last_fetched_at.lock().unwrap_or_else(PoisonError::into_inner);
            if self.is_current() {
                *last_fetched_at = Some(Instant::now());
            }
        }
        self.entry.refreshing.store(false, Ordering::Release);
    }
}

/// Shared cache of resource-name snapshots keyed by kind and namespace.
pub struct ResourceCache {
    entries: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
    fetcher: Arc<dyn ResourceFetcher>,
    runtime: Handle,
    settings: CacheSettings,
}

impl fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry_count = self.entries.read().map(|entries| entries.len()).unwrap_or_default();
        f.debug_struct("ResourceCache")
            .field("entries", &entry_count)
            .field("settings", &self.settings)
            .finish()
    }
}

impl ResourceCache {
    /// Creates an empty cache whose refresh tasks run on `runtime`.
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, runtime: Handle, settings: CacheSettings) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fetcher,
            runtime,
            settings,
        }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Returns the current snapshot for `key`, scheduling a background
    /// refresh when it is stale. Never waits on the fetcher.
    ///
    /// The first read of a key returns an empty snapshot.
    pub fn read(&self, key: &CacheKey) -> Snapshot {
        let entry = self.entry(key);
        self.maybe_refresh(key, &entry);
        entry.snapshot()
    }

    /// True while a refresh for `key` is in flight.
    pub fn is_refreshing(&self, key: &CacheKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .is_some_and(|entry| entry.refreshing.load(Ordering::Acquire))
    }

    /// True while any refresh is in flight.
    pub fn any_refreshing(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .any(|entry| entry.refreshing.load(Ordering::Acquire))
    }

    /// Marks every entry stale so the next read of each key refreshes it.
    /// Snapshots are kept until the refresh replaces them.
    pub fn invalidate_all(&self) {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        for entry in entries.values() {
            entry.invalidate();
        }
        debug!(entry_count = entries.len(), "resource cache invalidated");
    }

    fn entry(&self, key: &CacheKey) -> Arc<CacheEntry> {
        if let Some(entry) = self.entries.read().unwrap_or_else(PoisonError::into_inner).get(key) {
            return Arc::clone(entry);
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key.clone()).or_insert_with(|| {
            debug!(cache_key = %key, "resource cache entry created");
            Arc::new(CacheEntry::new())
        }))
    }

    fn maybe_refresh(&self, key: &CacheKey, entry: &Arc<CacheEntry>) {
        let ttl = self.settings.ttl;
        if entry.refreshing.load(Ordering::Acquire) || !entry.is_stale(ttl, Instant::now()) {
            return;
        }
        if entry
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        // Another refresh may have finished between the staleness check and
        // the claim.
        if !entry.is_stale(ttl, Instant::now()) {
            entry.refreshing.store(false, Ordering::Release);
            return;
        }

        let claim = RefreshClaim::new(Arc::clone(entry));
        let fetcher = Arc::clone(&self.fetcher);
        let key = key.clone();
        let refresh_timeout = self.settings.refresh_timeout;
        debug!(cache_key = %key, "resource refresh scheduled");
        self.runtime.spawn(async move {
            let started_at = Instant::now();
            let outcome = tokio::time::timeout(refresh_timeout, fetcher.fetch(key.kind(), key.scope())).await;
            match outcome {
                Ok(Ok(_)) if !claim.is_current() => {
                    debug!(cache_key = %key, "resource cache invalidated during refresh; discarding result");
                }
                Ok(Ok(items)) => {
                    info!(
                        cache_key = %key,
                        item_count = items.len(),
                        elapsed_ms = started_at.elapsed().as_millis() as u64,
                        "resource refresh completed"
                    );
                    claim.entry.replace(Arc::from(items));
                }
                Ok(Err(error)) => {
                    warn!(cache_key = %key, error = %error, "resource refresh failed; keeping previous snapshot");
                }
                Err(_) => {
                    warn!(
                        cache_key = %key,
                        timeout_ms = refresh_timeout.as_millis() as u64,
                        "resource refresh timed out; keeping previous snapshot"
                    );
                }
            }
            drop(claim);
        });
    }
}
