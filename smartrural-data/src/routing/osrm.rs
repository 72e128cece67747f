//! OSRM API response types for the Trip service.
//!
//! The Trip service solves a travelling-salesman problem over the supplied
//! coordinates. With `source=first&destination=last&roundtrip=false` the
//! first and last coordinates stay fixed and only the interior is reordered.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#trip-service>

use serde::Deserialize;

/// OSRM Trip API response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTrips"` - No trip visiting all coordinates exists
    /// - `"NotImplemented"` - Unsupported source/destination combination
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Computed trips; only the first is used.
    #[serde(default)]
    pub trips: Vec<TripRoute>,

    /// Input coordinates snapped to the road network, in input order.
    #[serde(default)]
    pub waypoints: Vec<TripWaypointObject>,
}

impl TripResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One optimised trip.
#[derive(Debug, Deserialize)]
pub struct TripRoute {
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
    /// Route geometry, present with `geometries=geojson`.
    pub geometry: Option<GeoJsonLineString>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct GeoJsonLineString {
    /// Geometry type, expected to be `"LineString"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lon, lat]` positions.
    pub coordinates: Vec<[f64; 2]>,
}

/// A snapped input coordinate.
#[derive(Debug, Deserialize)]
pub struct TripWaypointObject {
    /// Snapped `[lon, lat]` position.
    pub location: [f64; 2],
    /// Name of the street the coordinate snapped to.
    #[serde(default)]
    pub name: String,
    /// Position of this waypoint in the optimised trip.
    pub waypoint_index: Option<usize>,
}
