//! Stub services and fixtures shared by the CLI tests.

use super::*;
use smartrural_core::test_support::{MemoryCatalog, StubTripPlanner, sample_sites, sample_trip};
use smartrural_core::{Trip, TripError, TripRequest};
use std::rc::Rc;

/// [`TripPlanner`] handle sharing one recording stub with the test.
struct SharedTripPlanner(Rc<StubTripPlanner>);

impl TripPlanner for SharedTripPlanner {
    fn plan_trip(&self, request: &TripRequest) -> Result<Trip, TripError> {
        self.0.plan_trip(request)
    }
}

/// [`Services`] backed by in-memory doubles.
#[derive(Debug)]
pub(super) struct StubServices {
    catalog: MemoryCatalog,
    trip_planner: Rc<StubTripPlanner>,
}

impl StubServices {
    pub(super) fn new(catalog: MemoryCatalog, trip_planner: StubTripPlanner) -> Self {
        Self {
            catalog,
            trip_planner: Rc::new(trip_planner),
        }
    }

    /// Sample catalogue and a routing service returning the sample trip.
    pub(super) fn sample() -> Self {
        Self::new(
            MemoryCatalog::with_sites(sample_sites()),
            StubTripPlanner::with_trip(sample_trip()),
        )
    }

    pub(super) fn with_trip_error(error: TripError) -> Self {
        Self::new(
            MemoryCatalog::with_sites(sample_sites()),
            StubTripPlanner::with_error(error),
        )
    }

    pub(super) fn requests(&self) -> Vec<TripRequest> {
        self.trip_planner.requests()
    }
}

impl Services for StubServices {
    fn catalog(
        &self,
        _source: &CatalogSource,
        _timeout: Duration,
    ) -> Result<Box<dyn SiteCatalog>, CliError> {
        Ok(Box::new(self.catalog.clone()))
    }

    fn trip_planner(&self, _settings: &RoutingSettings) -> Result<Box<dyn TripPlanner>, CliError> {
        Ok(Box::new(SharedTripPlanner(Rc::clone(&self.trip_planner))))
    }

    fn position_source(
        &self,
        choice: &PositionChoice,
    ) -> Result<Box<dyn PositionSource>, CliError> {
        match choice {
            PositionChoice::Endpoint(url) => panic!("tests must not contact {url}"),
            other => DefaultServices.position_source(other),
        }
    }
}

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}
