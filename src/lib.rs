//! Client-side link preloading and soft navigation.
//!
//! Anchors bound through [`preload::PreloadBinder`] start loading their
//! target on mount, hover, or tap, and turn same-origin clicks into soft
//! navigations. [`navigation::Navigator::goto`] applies the new page's
//! state through [`state::AppState`] and only then pushes a history
//! entry. The browser surface is abstracted in [`platform`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use softnav::{Config, SoftNav, TriggerMode};
//! use softnav::platform::{MemoryAnchor, MemoryHistory, TokioSpawner};
//!
//! let history = MemoryHistory::parse("https://example.com/")?;
//! let spawner = Arc::new(TokioSpawner::try_current().unwrap());
//! let nav = SoftNav::with_http(&Config::load()?, history, spawner)?;
//!
//! let link = MemoryAnchor::parse("https://example.com/about")?;
//! nav.binder().bind(&link, TriggerMode::Tap).keep_alive();
//!
//! nav.navigator().goto("/pricing").await?;
//! ```

pub mod app;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod platform;
pub mod preload;
pub mod state;

pub use app::SoftNav;
pub use config::{Config, ConfigError};
pub use navigation::{NavError, NavTarget, NavigationOutcome, Navigator};
pub use preload::{Binding, ParseTriggerModeError, PreloadBinder, TriggerMode};
pub use state::{AppState, LoadError, PageData, PageLoader};
