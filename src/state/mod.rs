//! Shared application state: the href cache and the current page.
//!
//! [`AppState`] is an explicitly owned handle (cheap to clone, `Arc`
//! inside) handed to both the preload binder and the navigator, so
//! independent instances can coexist.

mod http;
mod loader;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::sync::watch;
use url::Url;

use crate::platform::Spawn;

pub use http::HttpLoader;
pub use loader::{LoadError, PageData, PageLoader};

/// Outcome of a load, shared by every waiter on a cache entry.
pub type LoadResult = Result<Arc<PageData>, LoadError>;

/// A cache entry: a load that is either in flight or finished.
#[derive(Clone)]
pub struct PendingLoad {
    id: u64,
    future: Shared<BoxFuture<'static, LoadResult>>,
}

impl PendingLoad {
    /// Unique id of this entry; a replaced entry gets a new id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The result, if the load already finished.
    pub fn peek(&self) -> Option<LoadResult> {
        self.future.peek().cloned()
    }

    /// Wait for the load to finish.
    pub async fn wait(&self) -> LoadResult {
        self.future.clone().await
    }
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("id", &self.id)
            .field("finished", &self.future.peek().is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    loader: Arc<dyn PageLoader>,
    spawner: Arc<dyn Spawn>,
    /// Keyed by the fully-qualified href.
    href_map: Mutex<HashMap<String, PendingLoad>>,
    next_id: AtomicU64,
    current: watch::Sender<Option<Arc<PageData>>>,
}

impl AppState {
    pub fn new(loader: Arc<dyn PageLoader>, spawner: Arc<dyn Spawn>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(AppStateInner {
                loader,
                spawner,
                href_map: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                current,
            }),
        }
    }

    pub fn contains(&self, href: &Url) -> bool {
        self.inner.href_map.lock().contains_key(href.as_str())
    }

    pub fn get(&self, href: &Url) -> Option<PendingLoad> {
        self.inner.href_map.lock().get(href.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.href_map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.href_map.lock().is_empty()
    }

    /// Start loading `href` unless it already has a cache entry.
    ///
    /// The presence check and the insertion happen under one lock, so
    /// concurrent callers for the same href start at most one load.
    /// Returns `true` if a new load was started.
    pub fn preload(&self, href: &Url) -> bool {
        let (_, inserted) = self.entry_or_load(href);
        inserted
    }

    /// Make `href` the current page.
    ///
    /// Reuses a cached (possibly in-flight) load when present. On failure
    /// the entry is evicted so the next attempt reloads.
    pub async fn update(&self, href: &Url) -> LoadResult {
        let (pending, _) = self.entry_or_load(href);

        match pending.wait().await {
            Ok(page) => {
                self.inner.current.send_replace(Some(Arc::clone(&page)));
                tracing::debug!(target: "state", url = %href, "Current page updated");
                Ok(page)
            }
            Err(err) => {
                self.evict(href, pending.id());
                Err(err)
            }
        }
    }

    /// The page most recently applied by [`update`](Self::update).
    pub fn current(&self) -> Option<Arc<PageData>> {
        self.inner.current.borrow().clone()
    }

    /// Watch the current page.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<PageData>>> {
        self.inner.current.subscribe()
    }

    /// Drop the cache entry for `href`. Returns `true` if one existed.
    pub fn invalidate(&self, href: &Url) -> bool {
        self.inner.href_map.lock().remove(href.as_str()).is_some()
    }

    /// Drop every cache entry.
    pub fn clear(&self) {
        self.inner.href_map.lock().clear();
    }

    fn entry_or_load(&self, href: &Url) -> (PendingLoad, bool) {
        let pending = {
            let mut map = self.inner.href_map.lock();
            if let Some(existing) = map.get(href.as_str()) {
                return (existing.clone(), false);
            }

            let loader = Arc::clone(&self.inner.loader);
            let target = href.clone();
            let future = async move { loader.load(&target).await.map(Arc::new) }
                .boxed()
                .shared();
            let pending = PendingLoad {
                id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
                future,
            };
            map.insert(href.to_string(), pending.clone());
            pending
        };

        tracing::debug!(
            target: "state",
            url = %href,
            loader = self.inner.loader.name(),
            "Load started"
        );

        // Drive the load eagerly; waiters share the same result.
        let state = self.clone();
        let href = href.clone();
        let task = pending.clone();
        self.inner.spawner.spawn(
            async move {
                if let Err(err) = task.wait().await {
                    tracing::warn!(target: "state", url = %href, error = %err, "Load failed");
                    state.evict(&href, task.id());
                }
            }
            .boxed(),
        );

        (pending, true)
    }

    /// Remove the entry for `href` only if it is still entry `id`.
    fn evict(&self, href: &Url, id: u64) {
        let mut map = self.inner.href_map.lock();
        if map.get(href.as_str()).is_some_and(|p| p.id == id) {
            map.remove(href.as_str());
        }
    }
}
