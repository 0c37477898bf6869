//! In-process implementations of the browser surface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use super::{Anchor, DomEvent, EventKind, History, Listener, ListenerId};

/// Anchor element held in memory. Events are fired with [`dispatch`](Self::dispatch).
pub struct MemoryAnchor {
    href: Url,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, EventKind, Listener)>>,
}

impl MemoryAnchor {
    pub fn new(href: Url) -> Self {
        Self {
            href,
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Parse `href` and wrap the anchor in an `Arc`, ready for binding.
    pub fn parse(href: &str) -> Result<Arc<Self>, url::ParseError> {
        Ok(Arc::new(Self::new(Url::parse(href)?)))
    }

    /// Fire `kind` at this element and return the event after all listeners ran.
    pub fn dispatch(&self, kind: EventKind) -> DomEvent {
        // Snapshot so listeners may add or remove listeners without deadlocking.
        let matching: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        let mut event = DomEvent::new(kind);
        for listener in matching {
            listener(&mut event);
        }
        event
    }

    /// Total number of listeners attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Number of listeners attached for `kind`.
    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }
}

impl Anchor for MemoryAnchor {
    fn href(&self) -> Url {
        self.href.clone()
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, kind, listener));
        id
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _, _)| *lid != id);
        listeners.len() != before
    }
}

/// A pushed history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: String,
    pub url: Url,
}

/// Session history held in memory.
///
/// The initial location is the first entry; [`location`](History::location)
/// is always the most recent one.
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new(initial: Url) -> Self {
        let entry = HistoryEntry {
            state: initial.to_string(),
            url: initial,
        };
        Self {
            entries: Mutex::new(vec![entry]),
        }
    }

    pub fn parse(initial: &str) -> Result<Arc<Self>, url::ParseError> {
        Ok(Arc::new(Self::new(Url::parse(initial)?)))
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Url {
        let entries = self.entries.lock();
        // Constructed with one entry and only ever appended to.
        entries[entries.len() - 1].url.clone()
    }

    fn push_state(&self, state: &str, url: &Url) {
        self.entries.lock().push(HistoryEntry {
            state: state.to_string(),
            url: url.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_listener(count: &Arc<AtomicUsize>) -> Listener {
        let count = Arc::clone(count);
        Arc::new(move |_event: &mut DomEvent| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_only_hits_matching_kind() {
        let anchor = MemoryAnchor::parse("https://example.com/a").unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        anchor.add_event_listener(EventKind::PointerEnter, counter_listener(&count));

        anchor.dispatch(EventKind::Click);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        anchor.dispatch(EventKind::PointerEnter);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_listener() {
        let anchor = MemoryAnchor::parse("https://example.com/a").unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let id = anchor.add_event_listener(EventKind::Click, counter_listener(&count));

        assert!(anchor.remove_event_listener(id));
        assert!(!anchor.remove_event_listener(id));

        anchor.dispatch(EventKind::Click);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(anchor.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_prevent_default() {
        let anchor = MemoryAnchor::parse("https://example.com/a").unwrap();
        anchor.add_event_listener(
            EventKind::Click,
            Arc::new(|event: &mut DomEvent| event.prevent_default()),
        );
        assert!(anchor.dispatch(EventKind::Click).default_prevented());
    }

    #[test]
    fn test_history_push_moves_location() {
        let history = MemoryHistory::parse("https://example.com/").unwrap();
        assert_eq!(history.location().as_str(), "https://example.com/");

        let next = Url::parse("https://example.com/next").unwrap();
        history.push_state(next.as_str(), &next);

        assert_eq!(history.location(), next);
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].state, "https://example.com/next");
    }
}
