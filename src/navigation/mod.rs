//! Soft navigation: apply the new page's state, then record it in history.

mod error;

use std::sync::Arc;

use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::platform::{same_origin, History};
use crate::state::AppState;

pub use error::NavError;

/// Where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Absolute or relative URL text, resolved against the current location.
    Text(String),
    /// An already parsed URL.
    Url(Url),
}

impl NavTarget {
    /// Resolve to an absolute URL.
    pub fn resolve(&self, base: &Url) -> Result<Url, NavError> {
        match self {
            NavTarget::Text(input) => base.join(input).map_err(|source| NavError::InvalidUrl {
                input: input.clone(),
                source,
            }),
            NavTarget::Url(url) => Ok(url.clone()),
        }
    }
}

impl From<&str> for NavTarget {
    fn from(value: &str) -> Self {
        NavTarget::Text(value.to_string())
    }
}

impl From<String> for NavTarget {
    fn from(value: String) -> Self {
        NavTarget::Text(value)
    }
}

impl From<Url> for NavTarget {
    fn from(value: Url) -> Self {
        NavTarget::Url(value)
    }
}

impl From<&Url> for NavTarget {
    fn from(value: &Url) -> Self {
        NavTarget::Url(value.clone())
    }
}

/// Result of a navigation started by an intercepted click.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationOutcome {
    /// Href of the clicked link.
    pub url: Url,
    /// The URL pushed to history, or why nothing was pushed.
    pub result: Result<Url, NavError>,
}

/// Performs soft navigations against shared state and a history.
#[derive(Clone)]
pub struct Navigator {
    state: AppState,
    history: Arc<dyn History>,
}

impl Navigator {
    pub fn new(state: AppState, history: Arc<dyn History>) -> Self {
        Self { state, history }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current location as reported by the history.
    pub fn location(&self) -> Url {
        self.history.location()
    }

    /// Navigate to `target` without reloading the page.
    ///
    /// The history entry is pushed only after the state update finished,
    /// so the address never changes ahead of the content. Intended for
    /// same-origin targets; callers must check that themselves.
    ///
    /// # Errors
    /// - [`NavError::InvalidUrl`] if the target cannot be resolved.
    /// - [`NavError::Load`] if the state update fails. No history entry is
    ///   pushed in that case.
    pub async fn goto(&self, target: impl Into<NavTarget>) -> Result<Url, NavError> {
        let location = self.history.location();
        let href = target.into().resolve(&location)?;

        if !same_origin(&href, &location) {
            tracing::debug!(
                target: "navigation",
                url = %href,
                location = %location,
                "Navigating to a cross-origin URL"
            );
        }

        let span = tracing::info_span!("goto", nav_id = %Uuid::new_v4(), url = %href);
        async {
            self.state.update(&href).await?;
            self.history.push_state(href.as_str(), &href);
            tracing::info!(target: "navigation", "Navigated");
            Ok::<_, NavError>(href.clone())
        }
        .instrument(span)
        .await
    }
}
