//! Error types for soft navigation.

use thiserror::Error;

use crate::state::LoadError;

/// Errors that can occur during [`Navigator::goto`](super::Navigator::goto).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Target could not be resolved against the current location.
    #[error("Invalid navigation target '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The state update for the target failed; history is untouched.
    #[error(transparent)]
    Load(#[from] LoadError),
}
