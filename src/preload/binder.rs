//! Anchor binding: preload triggers plus click interception.

use std::sync::{Arc, Weak};

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use url::Url;

use super::TriggerMode;
use crate::navigation::{NavigationOutcome, Navigator};
use crate::platform::{same_origin, Anchor, DomEvent, EventKind, Listener, ListenerId, Spawn};

type OutcomeSlot = Arc<Mutex<Option<mpsc::UnboundedSender<NavigationOutcome>>>>;

/// Wires anchors to the shared state and navigator.
///
/// Clones share one outcome slot, so a receiver attached later also sees
/// clicks on anchors bound before it existed.
#[derive(Clone)]
pub struct PreloadBinder {
    navigator: Navigator,
    spawner: Arc<dyn Spawn>,
    outcomes: OutcomeSlot,
    preload_enabled: bool,
}

impl PreloadBinder {
    pub fn new(navigator: Navigator, spawner: Arc<dyn Spawn>) -> Self {
        Self {
            navigator,
            spawner,
            outcomes: Arc::new(Mutex::new(None)),
            preload_enabled: true,
        }
    }

    /// Deliver the result of every click-triggered navigation to `tx`.
    pub fn with_outcomes(mut self, tx: mpsc::UnboundedSender<NavigationOutcome>) -> Self {
        self.outcomes = Arc::new(Mutex::new(Some(tx)));
        self
    }

    /// Start delivering click navigation outcomes to a fresh receiver.
    ///
    /// Replaces any earlier receiver. Outcomes of navigations that finished
    /// while nobody was attached are dropped, not buffered.
    pub fn subscribe_outcomes(&self) -> mpsc::UnboundedReceiver<NavigationOutcome> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.outcomes.lock() = Some(tx);
        rx
    }

    /// Whether a live outcome receiver is attached.
    pub fn has_outcome_receiver(&self) -> bool {
        self.outcomes
            .lock()
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// When disabled, bindings only intercept clicks.
    pub fn with_preload(mut self, enabled: bool) -> Self {
        self.preload_enabled = enabled;
        self
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Attach listeners to `anchor` according to `mode`.
    ///
    /// - `Mount` preloads right away.
    /// - `Hover` preloads on pointer-enter.
    /// - `Tap` preloads on pointer-down and touch-start.
    ///
    /// A click listener is always attached: same-origin clicks have their
    /// default prevented and become soft navigations, cross-origin clicks
    /// are left alone. Listeners stay attached until the returned
    /// [`Binding`] is dropped or unbound.
    pub fn bind<A: Anchor + 'static>(&self, anchor: &Arc<A>, mode: TriggerMode) -> Binding {
        let anchor: Arc<dyn Anchor> = anchor.clone();
        let weak = Arc::downgrade(&anchor);
        let mut listeners = Vec::new();

        if self.preload_enabled {
            match mode {
                TriggerMode::Mount => {
                    self.load_anchor(anchor.as_ref());
                }
                TriggerMode::Hover => {
                    listeners.push(anchor.add_event_listener(
                        EventKind::PointerEnter,
                        self.preload_listener(weak.clone()),
                    ));
                }
                TriggerMode::Tap => {
                    listeners.push(anchor.add_event_listener(
                        EventKind::PointerDown,
                        self.preload_listener(weak.clone()),
                    ));
                    listeners.push(anchor.add_event_listener(
                        EventKind::TouchStart,
                        self.preload_listener(weak.clone()),
                    ));
                }
            }
        }

        listeners.push(
            anchor.add_event_listener(EventKind::Click, self.click_listener(weak.clone())),
        );

        tracing::trace!(target: "preload", href = %anchor.href(), mode = %mode, "Anchor bound");

        Binding {
            anchor: weak,
            listeners,
            mode,
        }
    }

    /// Start loading the anchor's target.
    ///
    /// No-op for cross-origin links and for hrefs already in the cache.
    /// Returns `true` if a load was started.
    pub fn load_anchor(&self, anchor: &dyn Anchor) -> bool {
        let href = anchor.href();
        if !same_origin(&href, &self.navigator.location()) {
            return false;
        }

        let started = self.navigator.state().preload(&href);
        if started {
            tracing::debug!(target: "preload", href = %href, "Preload started");
        }
        started
    }

    fn preload_listener(&self, anchor: Weak<dyn Anchor>) -> Listener {
        let binder = self.clone();
        Arc::new(move |_event: &mut DomEvent| {
            if let Some(anchor) = anchor.upgrade() {
                binder.load_anchor(anchor.as_ref());
            }
        })
    }

    fn click_listener(&self, anchor: Weak<dyn Anchor>) -> Listener {
        let binder = self.clone();
        Arc::new(move |event: &mut DomEvent| {
            let Some(anchor) = anchor.upgrade() else {
                return;
            };
            let href = anchor.href();
            if !same_origin(&href, &binder.navigator.location()) {
                return;
            }
            event.prevent_default();
            binder.spawn_navigation(href);
        })
    }

    fn spawn_navigation(&self, href: Url) {
        let navigator = self.navigator.clone();
        let outcomes = self.outcomes.clone();

        self.spawner.spawn(
            async move {
                let result = navigator.goto(&href).await;
                if let Err(err) = &result {
                    tracing::warn!(target: "preload", href = %href, error = %err, "Navigation failed");
                }
                let Some(tx) = outcomes.lock().clone() else {
                    return;
                };
                if tx.send(NavigationOutcome { url: href, result }).is_err() {
                    // Receiver gone; detach it unless it was already replaced.
                    let mut slot = outcomes.lock();
                    if slot.as_ref().is_some_and(|cur| cur.same_channel(&tx)) {
                        *slot = None;
                    }
                }
            }
            .boxed(),
        );
    }
}

/// Listeners attached by [`PreloadBinder::bind`].
///
/// Dropping the binding removes them; call [`keep_alive`](Self::keep_alive)
/// to leave them attached for the element's lifetime.
#[must_use = "dropping a Binding detaches its listeners"]
pub struct Binding {
    anchor: Weak<dyn Anchor>,
    listeners: Vec<ListenerId>,
    mode: TriggerMode,
}

impl Binding {
    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Remove every listener this binding attached.
    pub fn unbind(mut self) {
        self.detach();
    }

    /// Release the guard without detaching anything.
    pub fn keep_alive(mut self) {
        self.listeners.clear();
    }

    fn detach(&mut self) {
        let Some(anchor) = self.anchor.upgrade() else {
            self.listeners.clear();
            return;
        };
        for id in self.listeners.drain(..) {
            anchor.remove_event_listener(id);
        }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.detach();
    }
}
