//! `TripPlanner` backed by OSRM's Trip API.

use std::time::Duration;

use geo::{Coord, LineString};
use log::debug;
use smartrural_core::{Trip, TripError, TripPlanner, TripRequest, TripWaypoint};

use super::osrm::{TripResponse, TripWaypointObject};
use crate::http::{
    BlockingClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError, TransportFailure,
};

/// Public OSRM demo server.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Routing profile used unless configured otherwise.
pub const DEFAULT_PROFILE: &str = "driving";

/// Fixed query: keep both endpoints, open trip, full GeoJSON geometry.
const TRIP_QUERY: &str =
    "source=first&destination=last&roundtrip=false&steps=true&overview=full&geometries=geojson";

/// Configuration for [`OsrmTripPlanner`].
#[derive(Debug, Clone)]
pub struct OsrmTripPlannerConfig {
    /// Base URL for the OSRM service.
    pub base_url: String,
    /// Routing profile, e.g. `"driving"` or `"foot"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmTripPlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmTripPlannerConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
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

/// OSRM-backed trip planner.
///
/// Blocks on the asynchronous request internally; see the crate's HTTP
/// bridge for how existing Tokio runtimes are reused.
#[derive(Debug)]
pub struct OsrmTripPlanner {
    http: BlockingClient,
    config: OsrmTripPlannerConfig,
}

impl OsrmTripPlanner {
    /// Create a planner for the OSRM service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmTripPlannerConfig::new(base_url))
    }

    /// Create a planner with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: OsrmTripPlannerConfig) -> Result<Self, ProviderBuildError> {
        url::Url::parse(&config.base_url).map_err(|err| ProviderBuildError::BaseUrl {
            url: config.base_url.clone(),
            message: err.to_string(),
        })?;
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Build the Trip API URL for `coordinates`.
    ///
    /// The URL format is `{base_url}/trip/v1/{profile}/{coordinates}?{query}`
    /// where coordinates are semicolon-separated `lon,lat` pairs.
    fn build_trip_url(&self, coordinates: &[Coord<f64>]) -> String {
        let coords = coordinates
            .iter()
            .map(|coord| format!("{},{}", coord.x, coord.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/trip/v1/{}/{}?{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords,
            TRIP_QUERY
        )
    }

    async fn fetch_trip_async(&self, request: &TripRequest) -> Result<Trip, TripError> {
        let url = self.build_trip_url(request.coordinates());
        debug!("requesting trip: {url}");

        let response = self
            .http
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        // OSRM reports NoTrips and InvalidQuery with 4xx statuses and a JSON
        // body; decode it before falling back to the status.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        match serde_json::from_str::<TripResponse>(&body) {
            Ok(trip_response) => Self::convert_response(trip_response),
            Err(_) if !status.is_success() => Err(TripError::Http {
                url,
                status: status.as_u16(),
                message: body,
            }),
            Err(err) => Err(TripError::Parse {
                message: err.to_string(),
            }),
        }
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TripError {
        let url = url.to_owned();
        match TransportFailure::classify(error) {
            TransportFailure::Timeout => TripError::Timeout {
                url,
                timeout_secs: self.http.timeout().as_secs(),
            },
            TransportFailure::Status { status, message } => TripError::Http {
                url,
                status,
                message,
            },
            TransportFailure::Network { message } => TripError::Network { url, message },
        }
    }

    /// Convert an OSRM response into a [`Trip`].
    ///
    /// Waypoints are reordered by `waypoint_index` so they follow the
    /// optimised visiting order.
    fn convert_response(response: TripResponse) -> Result<Trip, TripError> {
        if !response.is_ok() {
            return Err(TripError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response.trips.into_iter().next().ok_or(TripError::NoTrip)?;
        let geometry = route.geometry.ok_or_else(|| TripError::Parse {
            message: "OSRM trip missing geometry".to_owned(),
        })?;
        if geometry.kind != "LineString" {
            return Err(TripError::Parse {
                message: format!("unexpected geometry type {}", geometry.kind),
            });
        }

        Ok(Trip {
            distance_m: route.distance,
            duration_s: route.duration,
            geometry: geometry
                .coordinates
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect::<LineString<f64>>(),
            waypoints: visiting_order(response.waypoints),
        })
    }
}

fn visiting_order(waypoints: Vec<TripWaypointObject>) -> Vec<TripWaypoint> {
    let mut indexed: Vec<(usize, TripWaypointObject)> = waypoints
        .into_iter()
        .enumerate()
        .map(|(input, waypoint)| (waypoint.waypoint_index.unwrap_or(input), waypoint))
        .collect();
    indexed.sort_by_key(|(order, _)| *order);
    indexed
        .into_iter()
        .map(|(_, waypoint)| TripWaypoint {
            location: Coord {
                x: waypoint.location[0],
                y: waypoint.location[1],
            },
            name: waypoint.name,
        })
        .collect()
}

impl TripPlanner for OsrmTripPlanner {
    fn plan_trip(&self, request: &TripRequest) -> Result<Trip, TripError> {
        let count = request.coordinates().len();
        if count < 2 {
            return Err(TripError::TooFewCoordinates { count });
        }
        self.http.block_on(self.fetch_trip_async(request))
    }
}
