//! Browser surface consumed by the binder and navigator.
//!
//! Everything the crate needs from the host (anchor elements, event
//! registration, history, current location, task spawning) goes through
//! the traits in this module. A DOM binding implements them over
//! `web-sys`; [`memory`] implements them in-process for headless use
//! and tests.

mod events;
pub mod memory;

use futures::future::BoxFuture;
use url::Url;

pub use events::{DomEvent, EventKind, Listener, ListenerId};
pub use memory::{HistoryEntry, MemoryAnchor, MemoryHistory};

/// An anchor-like element that can carry listeners.
pub trait Anchor: Send + Sync {
    /// Fully-qualified target of the link.
    fn href(&self) -> Url;

    /// Register a listener for `kind`. Listeners fire in registration order.
    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove a previously registered listener.
    ///
    /// Returns `false` if the id was unknown (already removed).
    fn remove_event_listener(&self, id: ListenerId) -> bool;
}

/// Session history plus the current location.
pub trait History: Send + Sync {
    /// URL of the page currently displayed.
    fn location(&self) -> Url;

    /// Push a new entry and make `url` the current location.
    fn push_state(&self, state: &str, url: &Url);
}

/// Fire-and-forget task execution.
pub trait Spawn: Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// [`Spawn`] backed by a tokio runtime handle.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
}

impl TokioSpawner {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Spawner for the runtime the caller is running on, if any.
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Spawn for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.handle.spawn(task);
    }
}

/// True when both URLs share scheme, host and port.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}
