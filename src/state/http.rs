//! HTTP-backed [`PageLoader`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use super::loader::{LoadError, PageData, PageLoader};
use crate::config::LoaderConfig;

/// Loads page data with a GET request to the href itself.
#[derive(Clone)]
pub struct HttpLoader {
    client: reqwest::Client,
    accept: String,
}

impl HttpLoader {
    /// Build a loader from config.
    ///
    /// # Errors
    /// Returns [`LoadError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(|e| LoadError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            accept: config.accept.clone(),
        })
    }
}

#[async_trait]
impl PageLoader for HttpLoader {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn load(&self, href: &Url) -> Result<PageData, LoadError> {
        let response = self
            .client
            .get(href.clone())
            .header(ACCEPT, &self.accept)
            .send()
            .await
            .map_err(|e| LoadError::Request {
                url: href.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: href.to_string(),
                status: status.as_u16(),
            });
        }

        let url = response.url().clone();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json") || ct.contains("+json"));

        let text = response.text().await.map_err(|e| LoadError::Body {
            url: href.to_string(),
            message: e.to_string(),
        })?;

        let body = if is_json {
            serde_json::from_str(&text).map_err(|e| LoadError::Body {
                url: href.to_string(),
                message: e.to_string(),
            })?
        } else {
            serde_json::Value::String(text)
        };

        tracing::debug!(target: "state", url = %url, status = status.as_u16(), "Page loaded");

        Ok(PageData {
            url,
            status: status.as_u16(),
            body,
        })
    }
}
