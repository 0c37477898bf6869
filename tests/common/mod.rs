//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use parking_lot::Mutex;
use softnav::navigation::{NavigationOutcome, Navigator};
use softnav::platform::{MemoryHistory, TokioSpawner};
use softnav::preload::PreloadBinder;
use softnav::state::{AppState, LoadError, PageData, PageLoader};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use url::Url;

pub const ORIGIN: &str = "https://example.com/";

pub fn url(s: &str) -> Url {
    Url::parse(s).expect("valid test URL")
}

/// Poll `cond` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    cond()
}

// -- Loader mock --------------------------------------------------------------

/// Loader that records every call and can fail or block on demand.
pub struct MockLoader {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, LoadError>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            gate: None,
        })
    }

    /// Loader whose loads block until a permit is added to the returned semaphore.
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let loader = Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            gate: Some(gate.clone()),
        });
        (loader, gate)
    }

    pub fn fail(&self, href: &str, err: LoadError) {
        self.failures.lock().insert(href.to_string(), err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PageLoader for MockLoader {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn load(&self, href: &Url) -> Result<PageData, LoadError> {
        self.calls.lock().push(href.to_string());

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        if let Some(err) = self.failures.lock().get(href.as_str()).cloned() {
            return Err(err);
        }

        Ok(PageData {
            url: href.clone(),
            status: 200,
            body: serde_json::json!({ "path": href.path() }),
        })
    }
}

// -- Harness ------------------------------------------------------------------

/// State, navigator and binder wired to in-memory mocks at [`ORIGIN`].
///
/// Must be built inside a tokio runtime.
pub struct Harness {
    pub loader: Arc<MockLoader>,
    pub history: Arc<MemoryHistory>,
    pub state: AppState,
    pub navigator: Navigator,
    pub binder: PreloadBinder,
    pub outcomes: mpsc::UnboundedReceiver<NavigationOutcome>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_loader(MockLoader::new())
    }

    pub fn with_loader(loader: Arc<MockLoader>) -> Self {
        let spawner = Arc::new(TokioSpawner::try_current().expect("tokio runtime"));
        let history = MemoryHistory::parse(ORIGIN).expect("valid origin");
        let state = AppState::new(loader.clone(), spawner.clone());
        let navigator = Navigator::new(state.clone(), history.clone());
        let (tx, outcomes) = mpsc::unbounded_channel();
        let binder = PreloadBinder::new(navigator.clone(), spawner).with_outcomes(tx);

        Self {
            loader,
            history,
            state,
            navigator,
            binder,
            outcomes,
        }
    }

    /// Wait for every started load in the cache to settle.
    pub async fn settle(&self, hrefs: &[&str]) {
        for href in hrefs {
            if let Some(pending) = self.state.get(&url(href)) {
                let _ = pending.wait().await;
            }
        }
    }
}
