//! Collection-name cache for completion
//!
//! Completion runs on every keystroke and must not wait on the store. The
//! cache answers from memory and, the first time a base path is asked for,
//! starts one background fetch whose result serves later requests. Entries
//! never expire.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::runtime::Handle;
use tracing::debug;

use crate::store::CollectionLister;

/// Child collection names keyed by base document path
#[derive(Clone)]
pub struct CollectionCache {
    /// Last known names per base path
    names: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Base paths with a fetch started or finished
    fetching: Arc<Mutex<HashSet<String>>>,
    /// Source of collection names
    lister: Arc<dyn CollectionLister>,
}

impl CollectionCache {
    /// Create an empty cache backed by `lister`
    pub fn new(lister: Arc<dyn CollectionLister>) -> Self {
        Self {
            names: Arc::new(RwLock::new(HashMap::new())),
            fetching: Arc::new(Mutex::new(HashSet::new())),
            lister,
        }
    }

    /// Create a cache with known entries; those keys are never fetched
    pub fn with_entries<I, K>(lister: Arc<dyn CollectionLister>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let cache = Self::new(lister);
        {
            let mut names = cache.names.write().unwrap_or_else(PoisonError::into_inner);
            let mut fetching = cache.fetching.lock().unwrap_or_else(PoisonError::into_inner);
            for (key, value) in entries {
                let key = key.into();
                fetching.insert(key.clone());
                names.insert(key, value);
            }
        }
        cache
    }

    /// Get the known names for a base path, starting a fetch on first use
    ///
    /// # Arguments
    /// * `base_path` - Base document path, empty for the root
    ///
    /// # Returns
    /// * `Vec<String>` - Current snapshot, empty if nothing is known yet
    pub fn get(&self, base_path: &str) -> Vec<String> {
        let started = self
            .fetching
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(base_path.to_string());
        if started {
            self.spawn_fetch(base_path.to_string());
        }

        self.cached(base_path)
    }

    /// Current snapshot for a base path without starting a fetch
    pub fn cached(&self, base_path: &str) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(base_path)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a fetch for `base_path` has been started and not failed
    pub fn is_fetch_started(&self, base_path: &str) -> bool {
        self.fetching
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(base_path)
    }

    fn spawn_fetch(&self, base_path: String) {
        debug!(base_path = %base_path, "fetching collection names");
        let cache = self.clone();

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { cache.fetch(base_path).await });
            }
            Err(_) => {
                std::thread::spawn(move || futures::executor::block_on(cache.fetch(base_path)));
            }
        }
    }

    async fn fetch(self, base_path: String) {
        match self.lister.list_child_collections(&base_path).await {
            Ok(names) => {
                debug!(base_path = %base_path, count = names.len(), "cached collection names");
                self.names
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(base_path, names);
            }
            Err(e) => {
                debug!(base_path = %base_path, error = %e, "collection fetch failed");
                self.fetching
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&base_path);
            }
        }
    }
}

impl std::fmt::Debug for CollectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("CollectionCache").field("names", &*names).finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Result, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    /// Lister returning fixed names and counting calls
    pub(crate) struct CountingLister {
        pub calls: AtomicUsize,
        pub names: Vec<String>,
    }

    impl CountingLister {
        pub(crate) fn new(names: &[&str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                names: names.iter().map(|n| n.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl CollectionLister for CountingLister {
        async fn list_child_collections(&self, _base_path: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.names.clone())
        }
    }

    struct FailingLister {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CollectionLister for FailingLister {
        async fn list_child_collections(&self, base_path: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::NotFound(base_path.to_string()).into())
        }
    }

    fn wait_until(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for background fetch");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// Lister that answers only after a delay
    struct SlowLister {
        inner: CountingLister,
    }

    #[async_trait]
    impl CollectionLister for SlowLister {
        async fn list_child_collections(&self, base_path: &str) -> Result<Vec<String>> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.inner.list_child_collections(base_path).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_first_get_is_empty_then_populated() {
        let lister = Arc::new(SlowLister {
            inner: CountingLister::new(&["users", "groups"]),
        });
        let cache = CollectionCache::new(lister.clone());

        assert!(cache.get("").is_empty());
        assert!(cache.is_fetch_started(""));

        wait_until(|| !cache.cached("").is_empty());
        assert_eq!(cache.get(""), vec!["users", "groups"]);
        assert_eq!(lister.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_fetch_can_be_retried() {
        let lister = Arc::new(FailingLister {
            calls: AtomicUsize::new(0),
        });
        let cache = CollectionCache::new(lister.clone());

        assert!(cache.get("users/1").is_empty());
        wait_until(|| !cache.is_fetch_started("users/1"));
        assert_eq!(lister.calls.load(Ordering::SeqCst), 1);

        assert!(cache.get("users/1").is_empty());
        wait_until(|| lister.calls.load(Ordering::SeqCst) == 2);
    }

    #[test]
    fn test_concurrent_callers_fetch_once() {
        let lister = Arc::new(CountingLister::new(&["a"]));
        let cache = CollectionCache::new(lister.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        cache.get("");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        wait_until(|| !cache.cached("").is_empty());
        assert_eq!(lister.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fetch_without_runtime() {
        let lister = Arc::new(CountingLister::new(&["posts"]));
        let cache = CollectionCache::new(lister);

        cache.get("users/1");
        wait_until(|| cache.cached("users/1") == vec!["posts".to_string()]);
    }

    #[test]
    fn test_with_entries_skips_fetch() {
        let lister = Arc::new(CountingLister::new(&["other"]));
        let cache = CollectionCache::with_entries(
            lister.clone(),
            [("", vec!["user".to_string(), "group".to_string()])],
        );

        assert_eq!(cache.get(""), vec!["user", "group"]);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(lister.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let lister = Arc::new(CountingLister::new(&["x"]));
        let cache = CollectionCache::new(lister.clone());

        cache.get("");
        cache.get("a/1");
        wait_until(|| !cache.cached("").is_empty() && !cache.cached("a/1").is_empty());
        assert_eq!(lister.calls.load(Ordering::SeqCst), 2);
    }
}
