//! Optimised trips through the chosen sites.
//!
//! A [`TripRequest`] pins the origin first and the destination last; the
//! [`TripPlanner`] may reorder everything in between.

use geo::{Coord, LineString};
use thiserror::Error;

use crate::{Catalog, WaypointSelection};

/// Ordered coordinates sent to the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    coordinates: Vec<Coord<f64>>,
}

/// Errors from [`TripRequest::assemble`] and [`TripRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestError {
    /// The destination id is not in the catalogue.
    #[error("destination {id} is not in the site catalogue")]
    UnknownDestination {
        /// Requested identifier.
        id: String,
    },
    /// A trip needs at least an origin and a destination.
    #[error("a trip needs at least two coordinates, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied.
        count: usize,
    },
}

impl TripRequest {
    /// Wrap pre-ordered coordinates.
    pub fn new(coordinates: Vec<Coord<f64>>) -> Result<Self, TripRequestError> {
        if coordinates.len() < 2 {
            return Err(TripRequestError::TooFewCoordinates {
                count: coordinates.len(),
            });
        }
        Ok(Self { coordinates })
    }

    /// Build `[origin, waypoints.., destination]`.
    ///
    /// Waypoints come from `selection` in catalogue order with the destination
    /// removed.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use smartrural_core::{Catalog, Site, TripRequest, WaypointSelection};
    ///
    /// let catalog = Catalog::new(vec![
    ///     Site::new("a", "A", Coord { x: 1.0, y: 1.0 }),
    ///     Site::new("b", "B", Coord { x: 2.0, y: 2.0 }),
    /// ]);
    /// let mut selection = WaypointSelection::default();
    /// selection.set("a", true);
    /// selection.set("b", true);
    ///
    /// let request = TripRequest::assemble(Coord { x: 0.0, y: 0.0 }, &catalog, "b", &selection)?;
    /// assert_eq!(request.coordinates().len(), 3);
    /// # Ok::<(), smartrural_core::TripRequestError>(())
    /// ```
    pub fn assemble(
        origin: Coord<f64>,
        catalog: &Catalog,
        destination_id: &str,
        selection: &WaypointSelection,
    ) -> Result<Self, TripRequestError> {
        let destination =
            catalog
                .find(destination_id)
                .ok_or_else(|| TripRequestError::UnknownDestination {
                    id: destination_id.to_owned(),
                })?;

        let mut coordinates = vec![origin];
        coordinates.extend(
            selection
                .effective(catalog, destination_id)
                .map(|site| site.location),
        );
        coordinates.push(destination.location);
        Self::new(coordinates)
    }

    /// Coordinates in request order.
    pub fn coordinates(&self) -> &[Coord<f64>] {
        &self.coordinates
    }

    /// Number of interior waypoints.
    pub fn waypoint_count(&self) -> usize {
        self.coordinates.len().saturating_sub(2)
    }
}

/// A stop in the optimised visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripWaypoint {
    /// Snapped location of the stop.
    pub location: Coord<f64>,
    /// Street name reported by the routing service; often empty.
    pub name: String,
}

/// An optimised trip returned by a [`TripPlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Total distance in metres.
    pub distance_m: f64,
    /// Total duration in seconds.
    pub duration_s: f64,
    /// Full route geometry.
    pub geometry: LineString<f64>,
    /// Stops in final visiting order; first is the origin, last the destination.
    pub waypoints: Vec<TripWaypoint>,
}

/// Errors from [`TripPlanner::plan_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// The request had fewer than two coordinates.
    #[error("a trip needs at least two coordinates, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// The routing service could not be reached.
    #[error("failed to reach routing service at {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service answered with a non-`Ok` code.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service status code, e.g. `NoTrips`.
        code: String,
        /// Service message.
        message: String,
    },
    /// The service reported success but returned no trip.
    #[error("routing service returned no trip")]
    NoTrip,
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

/// Compute an optimised trip with fixed endpoints.
pub trait TripPlanner {
    /// Plan a trip visiting every coordinate in `request`.
    ///
    /// The first and last coordinates stay in place; interior coordinates may
    /// be reordered.
    fn plan_trip(&self, request: &TripRequest) -> Result<Trip, TripError>;
}
