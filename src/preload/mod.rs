//! Link preloading for anchor elements.
//!
//! A [`PreloadBinder`] attaches to an anchor and, depending on the
//! [`TriggerMode`], starts loading the link's target before the user
//! commits to it. Same-origin clicks are always turned into soft
//! navigations through the [`Navigator`](crate::navigation::Navigator).

mod binder;
mod mode;

pub use binder::{Binding, PreloadBinder};
pub use mode::{ParseTriggerModeError, TriggerMode};
