//! Catalogue client for the site API.

use std::time::Duration;

use log::debug;
use smartrural_core::{CatalogError, Site, SiteCatalog};

use super::api::parse_sites;
use crate::http::{
    BlockingClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError, TransportFailure,
    join_path,
};

/// Configuration for [`HttpSiteCatalog`].
#[derive(Debug, Clone)]
pub struct HttpSiteCatalogConfig {
    /// Base URL of the catalogue API (e.g. `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpSiteCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpSiteCatalogConfig {
    /// Create a configuration for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`SiteCatalog`] backed by `GET {base}/sitios`.
#[derive(Debug)]
pub struct HttpSiteCatalog {
    http: BlockingClient,
    url: url::Url,
}

impl HttpSiteCatalog {
    /// Create a client for the API at `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpSiteCatalogConfig::new(base_url))
    }

    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// runtime fails to build.
    pub fn with_config(config: HttpSiteCatalogConfig) -> Result<Self, ProviderBuildError> {
        let url = join_path(&config.base_url, &["sitios"])?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, url })
    }

    /// Endpoint queried by [`SiteCatalog::fetch_sites`].
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    async fn fetch_async(&self) -> Result<Vec<Site>, CatalogError> {
        let response = self
            .http
            .client()
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        parse_sites(&body)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> CatalogError {
        let url = self.url.to_string();
        match TransportFailure::classify(error) {
            TransportFailure::Timeout => CatalogError::Timeout {
                url,
                timeout_secs: self.http.timeout().as_secs(),
            },
            TransportFailure::Status { status, message } => CatalogError::Http {
                url,
                status,
                message,
            },
            TransportFailure::Network { message } => CatalogError::Network { url, message },
        }
    }
}

impl SiteCatalog for HttpSiteCatalog {
    fn fetch_sites(&self) -> Result<Vec<Site>, CatalogError> {
        debug!("fetching site catalogue from {}", self.url);
        self.http.block_on(self.fetch_async())
    }
}
