//! Trip planning against an OSRM routing service.
//!
//! [`OsrmTripPlanner`] implements [`smartrural_core::TripPlanner`] on top of
//! the OSRM Trip API. The first coordinate of a request is the fixed start,
//! the last is the fixed end, and OSRM reorders everything in between.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use smartrural_core::{TripPlanner, TripRequest};
//! use smartrural_data::routing::{OsrmTripPlanner, OsrmTripPlannerConfig};
//! use std::time::Duration;
//!
//! let config = OsrmTripPlannerConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(10));
//! let planner = OsrmTripPlanner::with_config(config)?;
//!
//! let request = TripRequest::new(vec![
//!     Coord { x: -80.2, y: -4.1 },
//!     Coord { x: -80.0, y: -3.95 },
//! ])?;
//! let trip = planner.plan_trip(&request)?;
//! println!("{:.1} km", trip.distance_m / 1000.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_OSRM_BASE_URL, DEFAULT_PROFILE, OsrmTripPlanner, OsrmTripPlannerConfig};
