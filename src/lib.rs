//! Facade crate for the Smart Rural route planner.
//!
//! This crate re-exports the core domain types and exposes the HTTP and file
//! adapters behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use smartrural_core::{
    Catalog, CatalogError, FixedPositionSource, GeolocationError, MapView, NoPositionSource,
    OriginMode, Phase, PlannerError, PositionOptions, PositionSource, ROUTE_PADDING_PX,
    RoutePlanner, SITE_FOCUS_ZOOM, Site, SiteCatalog, StopLabels, Trip, TripError, TripPlanner,
    TripRequest, TripRequestError, TripSummary, TripTicket, TripWaypoint, WaypointSelection,
};

#[cfg(feature = "http")]
pub use smartrural_data::{
    FileSiteCatalog, HttpPositionSource, HttpPositionSourceConfig, HttpSiteCatalog,
    HttpSiteCatalogConfig, OsrmTripPlanner, OsrmTripPlannerConfig, ProviderBuildError,
};
