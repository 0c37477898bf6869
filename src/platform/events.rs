//! Event primitives shared by every [`Anchor`](super::Anchor) implementation.

use std::fmt;
use std::sync::Arc;

/// The UI events the preload binder subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved onto the element (`mouseover`).
    PointerEnter,
    /// Pointer button pressed on the element (`mousedown`).
    PointerDown,
    /// Touch began on the element (`touchstart`).
    TouchStart,
    /// Element activated (`click`).
    Click,
}

impl EventKind {
    /// DOM event name for this kind.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::PointerEnter => "mouseover",
            EventKind::PointerDown => "mousedown",
            EventKind::TouchStart => "touchstart",
            EventKind::Click => "click",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_name())
    }
}

/// An event being dispatched to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    kind: EventKind,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Suppress the platform's default action (full page navigation for clicks).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Callback invoked synchronously while an event is dispatched.
pub type Listener = Arc<dyn Fn(&mut DomEvent) + Send + Sync>;

/// Handle returned by listener registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);
