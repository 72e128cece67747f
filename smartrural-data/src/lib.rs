//! Adapters that connect the route planner to the outside world.
//!
//! Responsibilities:
//! - Fetch the site catalogue over HTTP or from a local JSON file.
//! - Request optimised trips from an OSRM routing service.
//! - Look up the device position from a JSON geolocation endpoint.
//!
//! Boundaries:
//! - Domain rules live in `smartrural-core`; this crate only converts wire
//!   formats into core types and maps transport failures onto core errors.
//! - Every network call carries a timeout.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod geolocation;
mod http;
pub mod routing;

pub use catalog::{FileSiteCatalog, HttpSiteCatalog, HttpSiteCatalogConfig, SiteRecord};
pub use geolocation::{HttpPositionSource, HttpPositionSourceConfig};
pub use http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProviderBuildError};
pub use routing::{DEFAULT_OSRM_BASE_URL, OsrmTripPlanner, OsrmTripPlannerConfig};
