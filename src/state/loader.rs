//! Page loader contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Data fetched for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    /// URL the data was served from (after redirects).
    pub url: Url,
    /// HTTP status of the response.
    pub status: u16,
    /// Decoded body. Non-JSON bodies are stored as a JSON string.
    pub body: serde_json::Value,
}

/// Errors produced while loading a page.
///
/// `Clone` because a single load result is shared by every waiter on
/// the cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    Client { message: String },

    /// Transport failure (connect, timeout, TLS, ...).
    #[error("Request to '{url}' failed: {message}")]
    Request { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("Request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be read or decoded.
    #[error("Failed to read body from '{url}': {message}")]
    Body { url: String, message: String },
}

/// Fetches the data a page needs.
///
/// Any timeout policy belongs to the implementation.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Returns the name of this loader for logging.
    fn name(&self) -> &'static str;

    async fn load(&self, href: &Url) -> Result<PageData, LoadError>;
}
