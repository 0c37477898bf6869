//! One-stop wiring of config, state, navigator and binder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::navigation::{NavigationOutcome, Navigator};
use crate::platform::{Anchor, History, Spawn};
use crate::preload::{Binding, PreloadBinder, TriggerMode};
use crate::state::{AppState, HttpLoader, LoadError, PageLoader};

/// Shared state, navigator and binder for one page session.
pub struct SoftNav {
    state: AppState,
    navigator: Navigator,
    binder: PreloadBinder,
    default_trigger: TriggerMode,
    outcomes_taken: AtomicBool,
}

impl SoftNav {
    pub fn new(
        config: &Config,
        loader: Arc<dyn PageLoader>,
        history: Arc<dyn History>,
        spawner: Arc<dyn Spawn>,
    ) -> Self {
        let state = AppState::new(loader, Arc::clone(&spawner));
        let navigator = Navigator::new(state.clone(), history);
        let binder =
            PreloadBinder::new(navigator.clone(), spawner).with_preload(config.preload.enabled);

        tracing::debug!(
            preload_enabled = config.preload.enabled,
            default_trigger = %config.preload.default_trigger,
            "Soft navigation initialized"
        );

        Self {
            state,
            navigator,
            binder,
            default_trigger: config.preload.default_trigger,
            outcomes_taken: AtomicBool::new(false),
        }
    }

    /// Same as [`new`](Self::new) with an [`HttpLoader`] built from `config.loader`.
    pub fn with_http(
        config: &Config,
        history: Arc<dyn History>,
        spawner: Arc<dyn Spawn>,
    ) -> Result<Self, LoadError> {
        let loader = HttpLoader::from_config(&config.loader)?;
        Ok(Self::new(config, Arc::new(loader), history, spawner))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn binder(&self) -> &PreloadBinder {
        &self.binder
    }

    pub fn default_trigger(&self) -> TriggerMode {
        self.default_trigger
    }

    /// Bind `anchor` with the configured default trigger.
    pub fn bind<A: Anchor + 'static>(&self, anchor: &Arc<A>) -> Binding {
        self.binder.bind(anchor, self.default_trigger)
    }

    /// Receiver of click-triggered navigation outcomes. Only the first call gets it.
    ///
    /// Outcomes are delivered from this call on; until then they are dropped.
    pub fn take_outcomes(&self) -> Option<mpsc::UnboundedReceiver<NavigationOutcome>> {
        if self.outcomes_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(self.binder.subscribe_outcomes())
    }
}
