//! Device position from a JSON geolocation endpoint.
//!
//! The endpoint answers `GET` with either `{"lat": .., "lon": ..}` or
//! `{"latitude": .., "longitude": ..}`. Accuracy is whatever the endpoint
//! provides; the per-call timeout in [`PositionOptions`] is honoured.

use geo::Coord;
use log::debug;
use serde::Deserialize;
use smartrural_core::{GeolocationError, PositionOptions, PositionSource};

use crate::http::{
    BlockingClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError, TransportFailure,
};

/// Configuration for [`HttpPositionSource`].
#[derive(Debug, Clone)]
pub struct HttpPositionSourceConfig {
    /// Endpoint returning the caller's position.
    pub url: String,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpPositionSourceConfig {
    /// Create a configuration for the endpoint at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

/// [`PositionSource`] that asks a JSON endpoint where the device is.
#[derive(Debug)]
pub struct HttpPositionSource {
    http: BlockingClient,
    url: url::Url,
}

impl HttpPositionSource {
    /// Create a source for the endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or runtime
    /// fails to build.
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpPositionSourceConfig::new(url))
    }

    /// Create a source from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or runtime
    /// fails to build.
    pub fn with_config(config: HttpPositionSourceConfig) -> Result<Self, ProviderBuildError> {
        let url = url::Url::parse(&config.url).map_err(|err| ProviderBuildError::BaseUrl {
            url: config.url.clone(),
            message: err.to_string(),
        })?;
        // Each lookup overrides this with the timeout from `PositionOptions`.
        let http = BlockingClient::new(&config.user_agent, DEFAULT_TIMEOUT)?;
        Ok(Self { http, url })
    }

    async fn lookup_async(&self, options: &PositionOptions) -> Result<Coord<f64>, GeolocationError> {
        let convert = |err: reqwest::Error| convert_reqwest_error(&err, options);
        let response = self
            .http
            .client()
            .get(self.url.clone())
            .timeout(options.timeout)
            .send()
            .await
            .map_err(convert)?
            .error_for_status()
            .map_err(convert)?;
        let body = response.text().await.map_err(convert)?;
        parse_position(&body)
    }
}

fn convert_reqwest_error(error: &reqwest::Error, options: &PositionOptions) -> GeolocationError {
    match TransportFailure::classify(error) {
        TransportFailure::Timeout => GeolocationError::Timeout {
            timeout_secs: options.timeout.as_secs(),
        },
        TransportFailure::Status {
            status: 401 | 403, ..
        } => GeolocationError::PermissionDenied,
        TransportFailure::Status { message, .. } | TransportFailure::Network { message } => {
            GeolocationError::Lookup { message }
        }
    }
}

fn parse_position(body: &str) -> Result<Coord<f64>, GeolocationError> {
    let position: PositionResponse =
        serde_json::from_str(body).map_err(|err| GeolocationError::Lookup {
            message: err.to_string(),
        })?;
    if !position.lat.is_finite() || !position.lon.is_finite() {
        return Err(GeolocationError::Unavailable);
    }
    Ok(Coord {
        x: position.lon,
        y: position.lat,
    })
}

impl PositionSource for HttpPositionSource {
    fn current_position(&self, options: &PositionOptions) -> Result<Coord<f64>, GeolocationError> {
        debug!(
            "looking up position at {} (timeout {:?})",
            self.url, options.timeout
        );
        self.http.block_on(self.lookup_async(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case(r#"{"lat": -4.0, "lon": -79.2}"#)]
    #[case(r#"{"latitude": -4.0, "longitude": -79.2, "accuracy": 25}"#)]
    fn parses_either_field_style(#[case] body: &str) {
        assert_eq!(
            parse_position(body).expect("position parses"),
            Coord { x: -79.2, y: -4.0 }
        );
    }

    #[rstest]
    #[case("")]
    #[case(r#"{"lat": -4.0}"#)]
    #[case(r#"{"status": "fail"}"#)]
    fn malformed_body_is_a_lookup_error(#[case] body: &str) {
        assert!(matches!(
            parse_position(body),
            Err(GeolocationError::Lookup { .. })
        ));
    }

    #[rstest]
    fn invalid_url_is_rejected() {
        let err = HttpPositionSource::new("where am i").expect_err("invalid url");
        assert!(matches!(err, ProviderBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn unreachable_endpoint_fails_within_timeout() {
        let source = HttpPositionSource::new("http://127.0.0.1:9/position").expect("source builds");
        let options = PositionOptions {
            high_accuracy: true,
            timeout: Duration::from_secs(2),
        };

        let err = source
            .current_position(&options)
            .expect_err("nothing listens there");

        assert!(matches!(
            err,
            GeolocationError::Lookup { .. } | GeolocationError::Timeout { timeout_secs: 2 }
        ));
    }
}
