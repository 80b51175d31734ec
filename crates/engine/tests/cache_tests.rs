use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use kubeline_engine::{CacheSettings, FetchError, ResourceCache, ResourceFetcher};
use kubeline_types::{CacheKey, NamespaceScope, ResourceKind, Suggestion};
use tokio::{runtime::Handle, sync::Notify};

const TTL: Duration = Duration::from_secs(10);

/// Fetcher returning a fixed result and counting calls.
struct CountingFetcher {
    calls: AtomicUsize,
    names: Option<Vec<&'static str>>,
}

impl CountingFetcher {
    fn succeeding(names: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            names: Some(names.to_vec()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            names: None,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceFetcher for CountingFetcher {
    async fn fetch(&self, _kind: ResourceKind, _scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.names {
            Some(names) => Ok(names.iter().map(|name| Suggestion::bare(*name)).collect()),
            None => Err(FetchError::Status {
                code: Some(1),
                stderr: "connection refused".into(),
            }),
        }
    }
}

/// Fetcher that never completes.
struct HangingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl ResourceFetcher for HangingFetcher {
    async fn fetch(&self, _kind: ResourceKind, _scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Fetcher that waits for a signal before answering.
struct GatedFetcher {
    calls: AtomicUsize,
    release: Notify,
}

#[async_trait]
impl ResourceFetcher for GatedFetcher {
    async fn fetch(&self, _kind: ResourceKind, _scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(vec![Suggestion::bare("nginx-abc123")])
    }
}

fn pods_key() -> CacheKey {
    CacheKey::new(ResourceKind::Pod, NamespaceScope::Named("default".into()))
}

fn cache_with(fetcher: Arc<dyn ResourceFetcher>) -> ResourceCache {
    ResourceCache::new(
        fetcher,
        Handle::current(),
        CacheSettings {
            ttl: TTL,
            refresh_timeout: Duration::from_secs(15),
        },
    )
}

async fn settle(cache: &ResourceCache, key: &CacheKey) {
    while cache.is_refreshing(key) {
        tokio::task::yield_now().await;
    }
}

fn texts(snapshot: &[Suggestion]) -> Vec<&str> {
    snapshot.iter().map(Suggestion::text).collect()
}

#[tokio::test(start_paused = true)]
async fn first_read_is_empty_and_schedules_a_fetch() {
    let fetcher = CountingFetcher::succeeding(&["nginx-abc123", "redis-1"]);
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    assert!(cache.read(&key).is_empty());
    assert!(cache.is_refreshing(&key));
    settle(&cache, &key).await;

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(texts(&cache.read(&key)), vec!["nginx-abc123", "redis-1"]);
}

#[tokio::test(start_paused = true)]
async fn reads_within_ttl_do_not_refetch() {
    let fetcher = CountingFetcher::succeeding(&["nginx-abc123"]);
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    cache.read(&key);
    settle(&cache, &key).await;
    let first = cache.read(&key);
    tokio::time::advance(TTL - Duration::from_secs(1)).await;
    let second = cache.read(&key);

    assert_eq!(fetcher.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!cache.is_refreshing(&key));
}

#[tokio::test(start_paused = true)]
async fn stale_read_serves_old_snapshot_while_refreshing() {
    let fetcher = CountingFetcher::succeeding(&["nginx-abc123"]);
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    cache.read(&key);
    settle(&cache, &key).await;
    tokio::time::advance(TTL + Duration::from_secs(1)).await;

    assert_eq!(texts(&cache.read(&key)), vec!["nginx-abc123"]);
    assert!(cache.is_refreshing(&key));
    settle(&cache, &key).await;
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_fetcher_is_called_once_per_ttl() {
    let fetcher = CountingFetcher::failing();
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    for _ in 0..5 {
        assert!(cache.read(&key).is_empty());
        settle(&cache, &key).await;
    }
    assert_eq!(fetcher.calls(), 1);

    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    for _ in 0..5 {
        assert!(cache.read(&key).is_empty());
        settle(&cache, &key).await;
    }
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn hanging_fetch_is_abandoned_after_refresh_timeout() {
    let fetcher = Arc::new(HangingFetcher {
        calls: AtomicUsize::new(0),
    });
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    cache.read(&key);
    tokio::time::sleep(Duration::from_secs(14)).await;
    assert!(cache.is_refreshing(&key));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!cache.is_refreshing(&key));
    assert!(cache.read(&key).is_empty());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    cache.read(&key);
    assert!(cache.is_refreshing(&key));
    tokio::task::yield_now().await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn keys_are_refreshed_independently() {
    let fetcher = CountingFetcher::succeeding(&["a"]);
    let cache = cache_with(fetcher.clone());
    let web = CacheKey::new(ResourceKind::Pod, NamespaceScope::Named("web".into()));
    let all = CacheKey::new(ResourceKind::Pod, NamespaceScope::All);
    let nodes = CacheKey::cluster(ResourceKind::Node);

    for key in [&web, &all, &nodes] {
        cache.read(key);
    }
    for key in [&web, &all, &nodes] {
        settle(&cache, key).await;
    }
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn invalidate_all_forces_refresh_but_keeps_snapshot() {
    let fetcher = CountingFetcher::succeeding(&["nginx-abc123"]);
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    cache.read(&key);
    settle(&cache, &key).await;
    cache.invalidate_all();

    assert_eq!(texts(&cache.read(&key)), vec!["nginx-abc123"]);
    settle(&cache, &key).await;
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn invalidation_during_refresh_is_not_lost() {
    let fetcher = Arc::new(GatedFetcher {
        calls: AtomicUsize::new(0),
        release: Notify::new(),
    });
    let cache = cache_with(fetcher.clone());
    let key = pods_key();

    cache.read(&key);
    tokio::task::yield_now().await;
    assert!(cache.is_refreshing(&key));
    cache.invalidate_all();

    fetcher.release.notify_one();
    settle(&cache, &key).await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    // The result fetched before the invalidation is discarded.
    assert!(cache.read(&key).is_empty());
    assert!(cache.is_refreshing(&key));

    fetcher.release.notify_one();
    settle(&cache, &key).await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(texts(&cache.read(&key)), vec!["nginx-abc123"]);
    assert!(!cache.is_refreshing(&key));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stale_reads_trigger_one_fetch() {
    let fetcher = Arc::new(GatedFetcher {
        calls: AtomicUsize::new(0),
        release: Notify::new(),
    });
    let cache = Arc::new(cache_with(fetcher.clone()));
    let key = pods_key();

    std::thread::scope(|scope| {
        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    cache.read(&key);
                }
            });
        }
    });

    fetcher.release.notify_one();
    while cache.is_refreshing(&key) {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(texts(&cache.read(&key)), vec!["nginx-abc123"]);
}
