//! Application state and event handling for route planning.
//!
//! [`RoutePlanner`] owns every piece of mutable session state: the loaded
//! catalogue, the origin mode, the chosen destination and waypoints, and the
//! last rendered trip. Each user action is a method; each method leaves the
//! planner in a well-defined [`Phase`].
//!
//! Route calculation is split in two so hosts with their own event loop can
//! run the network call elsewhere: [`RoutePlanner::begin_trip`] validates
//! input and hands out a [`TripTicket`], and [`RoutePlanner::complete_trip`]
//! applies the result. Starting a new trip or resetting invalidates older
//! tickets, so a slow response can never overwrite a newer one.

use geo::{BoundingRect, Coord};
use log::{debug, warn};
use thiserror::Error;

use crate::{
    Catalog, CatalogError, GeolocationError, MapView, OriginMode, PositionOptions,
    PositionSource, ROUTE_PADDING_PX, SITE_FOCUS_ZOOM, Site, SiteCatalog, StopLabels, Trip,
    TripError, TripPlanner, TripRequest, TripRequestError, TripSummary, WaypointSelection,
};

/// Where the planner is in the idle → rendered cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing chosen yet.
    #[default]
    Idle,
    /// An origin source is ready.
    OriginSet,
    /// A trip request is outstanding.
    Requesting {
        /// Generation of the outstanding request.
        generation: u64,
    },
    /// A trip is drawn on the map.
    Rendered,
}

/// Errors surfaced by [`RoutePlanner`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// No destination was selected.
    #[error("no destination selected")]
    MissingDestination,
    /// The selected destination is not in the catalogue.
    #[error("destination {id} is not in the site catalogue")]
    UnknownDestination {
        /// Selected identifier.
        id: String,
    },
    /// Neither a map-picked origin nor geolocation is available.
    #[error("no origin selected")]
    MissingOrigin,
    /// The request would hold fewer than two coordinates.
    #[error("a trip needs at least two coordinates, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates.
        count: usize,
    },
    /// The device position could not be determined.
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    /// The site catalogue could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The routing service failed.
    #[error(transparent)]
    Trip(#[from] TripError),
    /// A newer request or a reset replaced this one.
    #[error("trip request {generation} was superseded")]
    Superseded {
        /// Generation of the discarded request.
        generation: u64,
    },
    /// No site exists at the given display index.
    #[error("no site at index {index}")]
    UnknownSite {
        /// Requested index.
        index: usize,
    },
}

impl From<TripRequestError> for PlannerError {
    fn from(err: TripRequestError) -> Self {
        match err {
            TripRequestError::UnknownDestination { id } => Self::UnknownDestination { id },
            TripRequestError::TooFewCoordinates { count } => Self::TooFewCoordinates { count },
        }
    }
}

impl PlannerError {
    /// Message shown to the user, or `None` when the error is silent.
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            Self::MissingDestination => Some("Select a final destination."),
            Self::UnknownDestination { .. } => Some("Invalid destination."),
            Self::MissingOrigin => {
                Some("Choose an origin (your location or a click on the map).")
            }
            Self::TooFewCoordinates { .. } => Some("Select at least an origin and a destination."),
            Self::Geolocation(_) => {
                Some("Enable location permissions or choose the origin on the map.")
            }
            Self::Catalog(_) => Some("Could not load the site catalogue. Please try again."),
            Self::Trip(TripError::Network { .. } | TripError::Timeout { .. }) => {
                Some("Could not contact the routing service.")
            }
            Self::Trip(_) => Some("Could not calculate the route."),
            Self::Superseded { .. } | Self::UnknownSite { .. } => None,
        }
    }
}

/// Notice shown when map-pick mode is switched on.
pub const MAP_PICK_NOTICE: &str = "Click on the map to set the origin.";

/// A validated trip request awaiting its routing result.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTicket {
    generation: u64,
    request: TripRequest,
    destination: Site,
}

impl TripTicket {
    /// Request generation; later tickets have larger values.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Coordinates to send to the routing service.
    pub const fn request(&self) -> &TripRequest {
        &self.request
    }

    /// Destination site of the trip.
    pub const fn destination(&self) -> &Site {
        &self.destination
    }
}

/// Route-planning session state bound to a [`MapView`].
#[derive(Debug)]
pub struct RoutePlanner<V> {
    view: V,
    catalog: Catalog,
    origin: OriginMode,
    destination: Option<String>,
    waypoints: WaypointSelection,
    labels: StopLabels,
    position_options: PositionOptions,
    summary: Option<TripSummary>,
    route_drawn: bool,
    phase: Phase,
    generation: u64,
}

impl<V: MapView> RoutePlanner<V> {
    /// Start an idle session rendering into `view`.
    pub fn new(view: V) -> Self {
        Self {
            view,
            catalog: Catalog::default(),
            origin: OriginMode::default(),
            destination: None,
            waypoints: WaypointSelection::default(),
            labels: StopLabels::default(),
            position_options: PositionOptions::default(),
            summary: None,
            route_drawn: false,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    /// Override how stops are labelled in summaries.
    #[must_use]
    pub fn with_stop_labels(mut self, labels: StopLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Override the geolocation request options.
    #[must_use]
    pub const fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.position_options = options;
        self
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Loaded catalogue.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current origin mode.
    pub const fn origin(&self) -> &OriginMode {
        &self.origin
    }

    /// Selected destination id.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Ticked waypoints.
    pub const fn waypoints(&self) -> &WaypointSelection {
        &self.waypoints
    }

    /// Summary of the rendered trip.
    pub const fn summary(&self) -> Option<&TripSummary> {
        self.summary.as_ref()
    }

    /// Whether a route layer is on the map.
    pub const fn has_route(&self) -> bool {
        self.route_drawn
    }

    /// Rendering surface.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Consume the planner, returning its view.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Fetch the catalogue and rebuild markers, cards and destination options.
    ///
    /// On failure the user is alerted and the previous catalogue stays in
    /// place, so the call can simply be retried.
    pub fn load_catalog(&mut self, source: &dyn SiteCatalog) -> Result<usize, PlannerError> {
        let sites = match source.fetch_sites() {
            Ok(sites) => sites,
            Err(err) => return Err(self.fail(err.into())),
        };
        debug!("loaded {} sites", sites.len());

        self.catalog = Catalog::new(sites);
        self.view.clear_sites();
        for (index, site) in self.catalog.iter().enumerate() {
            self.view.add_site_marker(site);
            self.view.add_site_card(index, site);
            self.view.add_destination_option(site);
        }
        Ok(self.catalog.len())
    }

    /// Centre the map on the site at display `index`.
    pub fn view_site(&mut self, index: usize) -> Result<(), PlannerError> {
        let site = self
            .catalog
            .get(index)
            .ok_or(PlannerError::UnknownSite { index })?;
        self.view.focus_site(site, SITE_FOCUS_ZOOM);
        Ok(())
    }

    /// Toggle geolocation mode.
    ///
    /// Enabling it switches map-pick mode off and discards any picked origin.
    pub fn set_geolocation(&mut self, enabled: bool) {
        if enabled {
            self.drop_picked_origin();
            self.origin = OriginMode::Geolocation;
        } else if self.origin.is_geolocation() {
            self.origin = OriginMode::Unset;
        }
        self.settle_phase();
    }

    /// Toggle map-pick mode.
    ///
    /// Enabling it switches geolocation off, discards any picked origin and
    /// asks the user to click the map; disabling it discards the picked
    /// origin.
    pub fn set_map_pick(&mut self, enabled: bool) {
        if enabled {
            self.drop_picked_origin();
            self.origin = OriginMode::MapPick { picked: None };
            self.view.alert(MAP_PICK_NOTICE);
        } else if self.origin.is_map_pick() {
            self.drop_picked_origin();
            self.origin = OriginMode::Unset;
        }
        self.settle_phase();
    }

    /// Handle a click on the map.
    ///
    /// Ignored unless map-pick mode is active; otherwise replaces the origin
    /// and its marker.
    pub fn map_click(&mut self, location: Coord<f64>) {
        let OriginMode::MapPick { picked } = &mut self.origin else {
            return;
        };
        *picked = Some(location);
        self.view.set_origin_marker(location);
        self.settle_phase();
    }

    /// Use `location` as a map-picked origin without prompting for a click.
    ///
    /// Hosts that already know the coordinate, such as a command line, call
    /// this instead of [`Self::set_map_pick`] followed by [`Self::map_click`].
    pub fn pick_origin(&mut self, location: Coord<f64>) {
        self.origin = OriginMode::MapPick {
            picked: Some(location),
        };
        self.view.set_origin_marker(location);
        self.settle_phase();
    }

    /// Choose the destination; `None` or an empty id clears it.
    pub fn select_destination(&mut self, id: Option<&str>) {
        self.destination = id.filter(|value| !value.is_empty()).map(str::to_owned);
    }

    /// Record a waypoint checkbox toggle.
    pub fn set_waypoint(&mut self, id: &str, checked: bool) {
        self.waypoints.set(id, checked);
    }

    /// Validate inputs and issue a ticket for a trip request.
    ///
    /// Fails with an alert, and without touching the network, when the
    /// destination or origin is missing. Geolocation, when it is the origin
    /// source, is resolved here.
    pub fn begin_trip(&mut self, position: &dyn PositionSource) -> Result<TripTicket, PlannerError> {
        match self.prepare_request(position) {
            Ok((request, destination)) => {
                self.generation += 1;
                if let Phase::Requesting { generation } = self.phase {
                    debug!("trip request {generation} superseded by {}", self.generation);
                }
                self.phase = Phase::Requesting {
                    generation: self.generation,
                };
                debug!(
                    "trip request {} with {} waypoints",
                    self.generation,
                    request.waypoint_count()
                );
                Ok(TripTicket {
                    generation: self.generation,
                    request,
                    destination,
                })
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Apply the routing result for `ticket`.
    ///
    /// Stale tickets are discarded. A failed result alerts the user and
    /// leaves any previously drawn route untouched.
    pub fn complete_trip(
        &mut self,
        ticket: TripTicket,
        result: Result<Trip, TripError>,
    ) -> Result<TripSummary, PlannerError> {
        let current = Phase::Requesting {
            generation: ticket.generation,
        };
        if self.phase != current {
            warn!("discarding result of superseded trip request {}", ticket.generation);
            return Err(PlannerError::Superseded {
                generation: ticket.generation,
            });
        }

        let trip = match result {
            Ok(trip) => trip,
            Err(err) => {
                self.phase = if self.route_drawn {
                    Phase::Rendered
                } else {
                    Phase::Idle
                };
                self.settle_phase();
                return Err(self.fail(err.into()));
            }
        };

        if self.route_drawn {
            self.view.remove_route();
        }
        self.view.draw_route(&trip.geometry);
        self.route_drawn = true;
        if let Some(bounds) = trip.geometry.bounding_rect() {
            self.view.fit_bounds(bounds, ROUTE_PADDING_PX);
        }

        let summary =
            TripSummary::from_trip(&trip, &self.catalog, &ticket.destination, &self.labels);
        self.view.show_summary(&summary);
        self.summary = Some(summary.clone());
        self.phase = Phase::Rendered;
        Ok(summary)
    }

    /// Validate, request and render a trip in one go.
    pub fn calculate(
        &mut self,
        position: &dyn PositionSource,
        planner: &dyn TripPlanner,
    ) -> Result<TripSummary, PlannerError> {
        let ticket = self.begin_trip(position)?;
        let result = planner.plan_trip(ticket.request());
        self.complete_trip(ticket, result)
    }

    /// Clear the route, summary, waypoints and origin.
    pub fn reset(&mut self) {
        if self.route_drawn {
            self.view.remove_route();
            self.route_drawn = false;
        }
        self.view.clear_summary();
        self.summary = None;
        self.view.uncheck_waypoints();
        self.waypoints.clear();
        self.drop_picked_origin();
        self.origin = OriginMode::Unset;
        self.phase = Phase::Idle;
    }

    fn prepare_request(
        &self,
        position: &dyn PositionSource,
    ) -> Result<(TripRequest, Site), PlannerError> {
        let destination_id = self
            .destination
            .as_deref()
            .ok_or(PlannerError::MissingDestination)?;
        let origin = self.resolve_origin(position)?;
        let request =
            TripRequest::assemble(origin, &self.catalog, destination_id, &self.waypoints)?;
        let destination = self
            .catalog
            .find(destination_id)
            .cloned()
            .ok_or_else(|| PlannerError::UnknownDestination {
                id: destination_id.to_owned(),
            })?;
        Ok((request, destination))
    }

    fn resolve_origin(&self, position: &dyn PositionSource) -> Result<Coord<f64>, PlannerError> {
        match self.origin {
            OriginMode::MapPick {
                picked: Some(location),
            } => Ok(location),
            OriginMode::Geolocation => Ok(position.current_position(&self.position_options)?),
            OriginMode::MapPick { picked: None } | OriginMode::Unset => {
                Err(PlannerError::MissingOrigin)
            }
        }
    }

    fn drop_picked_origin(&mut self) {
        if self.origin.picked().is_some() {
            self.view.remove_origin_marker();
        }
        if let OriginMode::MapPick { picked } = &mut self.origin {
            *picked = None;
        }
    }

    /// Keep `Idle`/`OriginSet` in step with origin readiness.
    fn settle_phase(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::OriginSet) {
            let ready = self.origin.is_geolocation() || self.origin.picked().is_some();
            self.phase = if ready { Phase::OriginSet } else { Phase::Idle };
        }
    }

    fn fail(&mut self, err: PlannerError) -> PlannerError {
        warn!("route planner: {err}");
        if let Some(message) = err.alert_message() {
            self.view.alert(message);
        }
        err
    }
}
