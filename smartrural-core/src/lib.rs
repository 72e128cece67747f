//! Core domain types for the Smart Rural route planner.
//!
//! The crate models a catalogue of tourist sites, the user's choice of origin,
//! destination and intermediate stops, and the optimised trip returned by an
//! external routing service. I/O lives behind the [`SiteCatalog`],
//! [`PositionSource`] and [`TripPlanner`] traits; rendering lives behind
//! [`MapView`]. [`RoutePlanner`] ties them together as an explicit application
//! state object.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude` throughout.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod origin;
pub mod planner;
pub mod site;
pub mod summary;
#[doc(hidden)]
pub mod test_support;
pub mod trip;
pub mod view;
pub mod waypoints;

pub use catalog::{CatalogError, SiteCatalog};
pub use origin::{
    FixedPositionSource, GeolocationError, NoPositionSource, OriginMode, PositionOptions,
    PositionSource,
};
pub use planner::{Phase, PlannerError, RoutePlanner, TripTicket};
pub use site::{Catalog, Site};
pub use summary::{StopLabels, TripSummary};
pub use trip::{Trip, TripError, TripPlanner, TripRequest, TripRequestError, TripWaypoint};
pub use view::{MapView, ROUTE_PADDING_PX, SITE_FOCUS_ZOOM};
pub use waypoints::WaypointSelection;
