//! Behavioural tests for [`RoutePlanner`].

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use smartrural_core::test_support::{
    MemoryCatalog, RecordingView, StubTripPlanner, ViewEvent, sample_catalog, sample_trip,
};
use smartrural_core::{
    CatalogError, FixedPositionSource, OriginMode, Phase, PlannerError, RoutePlanner, TripSummary,
};
use std::cell::RefCell;

const PICKED_ORIGIN: Coord<f64> = Coord { x: -80.2, y: -4.1 };

/// Scenario state shared by every step.
#[derive(Debug)]
struct PlanningWorld {
    planner: RefCell<RoutePlanner<RecordingView>>,
    catalog: RefCell<MemoryCatalog>,
    trip_planner: StubTripPlanner,
    position: FixedPositionSource,
    outcome: RefCell<Option<Result<TripSummary, PlannerError>>>,
}

impl PlanningWorld {
    fn new() -> Self {
        Self {
            planner: RefCell::new(RoutePlanner::new(RecordingView::default())),
            catalog: RefCell::new(sample_catalog()),
            trip_planner: StubTripPlanner::with_trip(sample_trip()),
            position: FixedPositionSource::new(Coord { x: -80.3, y: -4.2 }),
            outcome: RefCell::new(None),
        }
    }

    fn load(&self) {
        let catalog = self.catalog.borrow();
        // Failures are asserted through the recorded alerts.
        let _ = self.planner.borrow_mut().load_catalog(&*catalog);
    }

    fn calculate(&self) {
        let outcome = self
            .planner
            .borrow_mut()
            .calculate(&self.position, &self.trip_planner);
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn summary(&self) -> TripSummary {
        self.outcome
            .borrow()
            .clone()
            .expect("route was calculated")
            .expect("calculation succeeded")
    }
}

#[fixture]
fn world() -> PlanningWorld {
    PlanningWorld::new()
}

// --- Given steps ---

#[given("a catalogue with three sites")]
fn catalogue_with_three_sites(#[from(world)] world: &PlanningWorld) {
    *world.catalog.borrow_mut() = sample_catalog();
}

#[given("a catalogue that cannot be reached")]
fn unreachable_catalogue(#[from(world)] world: &PlanningWorld) {
    *world.catalog.borrow_mut() = MemoryCatalog::with_error(CatalogError::Network {
        url: "http://localhost:5000/sitios".to_owned(),
        message: "connection refused".to_owned(),
    });
}

#[given("a loaded catalogue with three sites")]
fn loaded_catalogue(#[from(world)] world: &PlanningWorld) {
    world.load();
}

#[given("the origin is picked on the map")]
fn origin_picked(#[from(world)] world: &PlanningWorld) {
    let mut planner = world.planner.borrow_mut();
    planner.set_map_pick(true);
    planner.map_click(PICKED_ORIGIN);
}

#[given("geolocation is switched on")]
fn geolocation_on(#[from(world)] world: &PlanningWorld) {
    world.planner.borrow_mut().set_geolocation(true);
}

#[given("Laguna is the destination")]
fn laguna_destination(#[from(world)] world: &PlanningWorld) {
    world
        .planner
        .borrow_mut()
        .select_destination(Some("laguna"));
}

#[given("Laguna and Cascada are ticked as waypoints")]
fn waypoints_ticked(#[from(world)] world: &PlanningWorld) {
    let mut planner = world.planner.borrow_mut();
    planner.set_waypoint("laguna", true);
    planner.set_waypoint("cascada", true);
}

#[given("I calculate the route")]
fn route_calculated(#[from(world)] world: &PlanningWorld) {
    world.calculate();
}

// --- When steps ---

#[when("I load the catalogue")]
fn load_catalogue(#[from(world)] world: &PlanningWorld) {
    world.load();
}

#[when("I calculate the route")]
fn calculate_route(#[from(world)] world: &PlanningWorld) {
    world.calculate();
}

#[when("I switch geolocation on")]
fn switch_geolocation_on(#[from(world)] world: &PlanningWorld) {
    world.planner.borrow_mut().set_geolocation(true);
}

#[when("I switch map picking on")]
fn switch_map_pick_on(#[from(world)] world: &PlanningWorld) {
    world.planner.borrow_mut().set_map_pick(true);
}

#[when("I clear the route")]
fn clear_route(#[from(world)] world: &PlanningWorld) {
    world.planner.borrow_mut().reset();
}

// --- Then steps ---

#[then("each site gets a marker, a card and a destination option in catalogue order")]
fn sites_rendered(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    let expected = vec!["mirador", "cascada", "laguna"];
    assert_eq!(planner.view().marker_ids(), expected);
    assert_eq!(planner.view().card_ids(), expected);
    assert_eq!(planner.view().option_ids(), expected);
    assert_eq!(planner.catalog().len(), 3);
}

#[then("the user is alerted that the catalogue could not be loaded")]
fn catalogue_alert(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert_eq!(
        planner.view().alerts(),
        vec!["Could not load the site catalogue. Please try again."]
    );
}

#[then("no sites are shown")]
fn no_sites(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert!(planner.catalog().is_empty());
    assert!(planner.view().marker_ids().is_empty());
}

#[then("the routing request has three coordinates ending at Laguna")]
fn request_without_duplicate(#[from(world)] world: &PlanningWorld) {
    let requests = world.trip_planner.requests();
    assert_eq!(requests.len(), 1, "expected exactly one routing request");
    let coordinates = requests[0].coordinates();
    assert_eq!(
        coordinates,
        &[
            PICKED_ORIGIN,
            Coord { x: -80.10, y: -4.05 },
            Coord { x: -80.00, y: -3.95 },
        ]
    );
}

#[then("the user is alerted to select a destination")]
fn destination_alert(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert_eq!(
        planner.view().alerts().last(),
        Some(&"Select a final destination.")
    );
    assert!(matches!(
        *world.outcome.borrow(),
        Some(Err(PlannerError::MissingDestination))
    ));
}

#[then("the user is alerted to choose an origin")]
fn origin_alert(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert_eq!(
        planner.view().alerts().last(),
        Some(&"Choose an origin (your location or a click on the map).")
    );
    assert!(matches!(
        *world.outcome.borrow(),
        Some(Err(PlannerError::MissingOrigin))
    ));
}

#[then("no routing request is made")]
fn no_request(#[from(world)] world: &PlanningWorld) {
    assert!(world.trip_planner.requests().is_empty());
}

#[then("the map-picked origin and its marker are gone")]
fn picked_origin_cleared(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert_eq!(planner.origin(), &OriginMode::Geolocation);
    assert_eq!(planner.origin().picked(), None);
    assert_eq!(planner.view().count(&ViewEvent::RemoveOriginMarker), 1);
}

#[then("geolocation is no longer active")]
fn geolocation_cleared(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert!(!planner.origin().is_geolocation());
    assert_eq!(planner.origin(), &OriginMode::MapPick { picked: None });
    assert_eq!(planner.phase(), Phase::Idle);
}

#[then("the summary lists Origin, Cascada, Mirador and Laguna")]
fn summary_stops(#[from(world)] world: &PlanningWorld) {
    assert_eq!(
        world.summary().stops,
        vec!["Origin", "Cascada", "Mirador", "Laguna"]
    );
}

#[then("the summary reports 18.3 km and 30 min")]
fn summary_totals(#[from(world)] world: &PlanningWorld) {
    let summary = world.summary();
    assert!((summary.distance_km - 18.3).abs() < 1e-9);
    assert_eq!(summary.duration_min, 30);
    let planner = world.planner.borrow();
    assert_eq!(planner.phase(), Phase::Rendered);
    assert!(planner.view().events().iter().any(|event| matches!(
        event,
        ViewEvent::FitBounds { padding_px: 40, .. }
    )));
}

#[then("the planner is back in its initial state")]
fn initial_state(#[from(world)] world: &PlanningWorld) {
    let planner = world.planner.borrow();
    assert_eq!(planner.phase(), Phase::Idle);
    assert!(!planner.has_route());
    assert!(planner.summary().is_none());
    assert!(planner.waypoints().is_empty());
    assert_eq!(planner.origin(), &OriginMode::Unset);
    let view = planner.view();
    assert_eq!(view.count(&ViewEvent::RemoveRoute), 1);
    assert_eq!(view.count(&ViewEvent::ClearSummary), 1);
    assert_eq!(view.count(&ViewEvent::UncheckWaypoints), 1);
    assert_eq!(view.count(&ViewEvent::RemoveOriginMarker), 1);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/route_planning.feature", name = $title)]
        fn $fn_name(world: PlanningWorld) {
            let _ = world;
        }
    };
}

register_scenario!(rendering_every_site, "rendering every catalogue site");
register_scenario!(surfacing_catalogue_failure, "surfacing a catalogue failure");
register_scenario!(
    keeping_destination_out_of_waypoints,
    "keeping the destination out of the waypoints"
);
register_scenario!(
    refusing_without_destination,
    "refusing to calculate without a destination"
);
register_scenario!(
    refusing_without_origin,
    "refusing to calculate without an origin"
);
register_scenario!(
    switching_to_geolocation,
    "switching from a map-picked origin to geolocation"
);
register_scenario!(
    switching_to_map_pick,
    "switching from geolocation to map picking"
);
register_scenario!(summarising_trip, "summarising an optimised trip");
register_scenario!(clearing_route, "clearing the route");
