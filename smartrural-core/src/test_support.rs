//! Test doubles shared by unit and behaviour tests.
//!
//! [`RecordingView`] logs every rendering call, [`MemoryCatalog`] serves a
//! fixed catalogue, and [`StubTripPlanner`] answers trip requests with a
//! canned result while remembering what it was asked.

use std::cell::RefCell;

use geo::{Coord, LineString, Rect};

use crate::{
    CatalogError, GeolocationError, MapView, PositionOptions, PositionSource, Site, SiteCatalog,
    Trip, TripError, TripPlanner, TripRequest, TripSummary, TripWaypoint,
};

/// One call made against a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// `clear_sites`.
    ClearSites,
    /// `add_site_marker`.
    SiteMarker {
        /// Site id.
        id: String,
    },
    /// `add_site_card`.
    SiteCard {
        /// Display index.
        index: usize,
        /// Site id.
        id: String,
    },
    /// `add_destination_option`.
    DestinationOption {
        /// Site id.
        id: String,
    },
    /// `focus_site`.
    FocusSite {
        /// Site id.
        id: String,
        /// Requested zoom.
        zoom: u8,
    },
    /// `set_origin_marker`.
    OriginMarker(Coord<f64>),
    /// `remove_origin_marker`.
    RemoveOriginMarker,
    /// `draw_route`.
    DrawRoute {
        /// Number of points in the geometry.
        points: usize,
    },
    /// `remove_route`.
    RemoveRoute,
    /// `fit_bounds`.
    FitBounds {
        /// Bounds requested.
        bounds: Rect<f64>,
        /// Padding requested.
        padding_px: u32,
    },
    /// `show_summary`.
    ShowSummary(TripSummary),
    /// `clear_summary`.
    ClearSummary,
    /// `uncheck_waypoints`.
    UncheckWaypoints,
    /// `alert`.
    Alert(String),
}

/// A [`MapView`] that records calls in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
}

impl RecordingView {
    /// Every recorded call.
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Number of calls equal to `event`.
    pub fn count(&self, event: &ViewEvent) -> usize {
        self.events.iter().filter(|seen| *seen == event).count()
    }

    /// Recorded alert messages.
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Ids passed to `add_site_marker`, in order.
    pub fn marker_ids(&self) -> Vec<&str> {
        self.ids(|event| match event {
            ViewEvent::SiteMarker { id } => Some(id),
            _ => None,
        })
    }

    /// Ids passed to `add_site_card`, in order.
    pub fn card_ids(&self) -> Vec<&str> {
        self.ids(|event| match event {
            ViewEvent::SiteCard { id, .. } => Some(id),
            _ => None,
        })
    }

    /// Ids passed to `add_destination_option`, in order.
    pub fn option_ids(&self) -> Vec<&str> {
        self.ids(|event| match event {
            ViewEvent::DestinationOption { id } => Some(id),
            _ => None,
        })
    }

    fn ids(&self, select: impl Fn(&ViewEvent) -> Option<&String>) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| select(event).map(String::as_str))
            .collect()
    }

    fn push(&mut self, event: ViewEvent) {
        self.events.push(event);
    }
}

impl MapView for RecordingView {
    fn clear_sites(&mut self) {
        self.push(ViewEvent::ClearSites);
    }

    fn add_site_marker(&mut self, site: &Site) {
        self.push(ViewEvent::SiteMarker {
            id: site.id.clone(),
        });
    }

    fn add_site_card(&mut self, index: usize, site: &Site) {
        self.push(ViewEvent::SiteCard {
            index,
            id: site.id.clone(),
        });
    }

    fn add_destination_option(&mut self, site: &Site) {
        self.push(ViewEvent::DestinationOption {
            id: site.id.clone(),
        });
    }

    fn focus_site(&mut self, site: &Site, zoom: u8) {
        self.push(ViewEvent::FocusSite {
            id: site.id.clone(),
            zoom,
        });
    }

    fn set_origin_marker(&mut self, location: Coord<f64>) {
        self.push(ViewEvent::OriginMarker(location));
    }

    fn remove_origin_marker(&mut self) {
        self.push(ViewEvent::RemoveOriginMarker);
    }

    fn draw_route(&mut self, geometry: &LineString<f64>) {
        self.push(ViewEvent::DrawRoute {
            points: geometry.0.len(),
        });
    }

    fn remove_route(&mut self) {
        self.push(ViewEvent::RemoveRoute);
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, padding_px: u32) {
        self.push(ViewEvent::FitBounds { bounds, padding_px });
    }

    fn show_summary(&mut self, summary: &TripSummary) {
        self.push(ViewEvent::ShowSummary(summary.clone()));
    }

    fn clear_summary(&mut self) {
        self.push(ViewEvent::ClearSummary);
    }

    fn uncheck_waypoints(&mut self) {
        self.push(ViewEvent::UncheckWaypoints);
    }

    fn alert(&mut self, message: &str) {
        self.push(ViewEvent::Alert(message.to_owned()));
    }
}

/// In-memory [`SiteCatalog`] returning a fixed response.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    response: Result<Vec<Site>, CatalogError>,
}

impl MemoryCatalog {
    /// Serve `sites`.
    pub fn with_sites(sites: Vec<Site>) -> Self {
        Self {
            response: Ok(sites),
        }
    }

    /// Fail every fetch with `error`.
    pub fn with_error(error: CatalogError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl SiteCatalog for MemoryCatalog {
    fn fetch_sites(&self) -> Result<Vec<Site>, CatalogError> {
        self.response.clone()
    }
}

/// [`TripPlanner`] returning a canned result and recording requests.
#[derive(Debug)]
pub struct StubTripPlanner {
    response: Result<Trip, TripError>,
    requests: RefCell<Vec<TripRequest>>,
}

impl StubTripPlanner {
    /// Answer every request with `trip`.
    pub fn with_trip(trip: Trip) -> Self {
        Self {
            response: Ok(trip),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fail every request with `error`.
    pub fn with_error(error: TripError) -> Self {
        Self {
            response: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<TripRequest> {
        self.requests.borrow().clone()
    }
}

impl TripPlanner for StubTripPlanner {
    fn plan_trip(&self, request: &TripRequest) -> Result<Trip, TripError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.clone()
    }
}

/// [`PositionSource`] failing with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingPositionSource(pub GeolocationError);

impl PositionSource for FailingPositionSource {
    fn current_position(&self, _options: &PositionOptions) -> Result<Coord<f64>, GeolocationError> {
        Err(self.0.clone())
    }
}

/// Three sites around Loja: `mirador`, `cascada`, `laguna`.
pub fn sample_sites() -> Vec<Site> {
    vec![
        Site::new("mirador", "Mirador", Coord { x: -80.05, y: -4.01 }),
        Site::new("cascada", "Cascada", Coord { x: -80.10, y: -4.05 }),
        Site::new("laguna", "Laguna", Coord { x: -80.00, y: -3.95 }),
    ]
}

/// [`MemoryCatalog`] serving [`sample_sites`].
pub fn sample_catalog() -> MemoryCatalog {
    MemoryCatalog::with_sites(sample_sites())
}

/// A trip from `(-80.2, -4.1)` via Cascada and Mirador to Laguna.
pub fn sample_trip() -> Trip {
    let stops = [
        Coord { x: -80.2, y: -4.1 },
        Coord { x: -80.1001, y: -4.0502 },
        Coord { x: -80.0498, y: -4.0103 },
        Coord { x: -80.0, y: -3.95 },
    ];
    Trip {
        distance_m: 18_260.0,
        duration_s: 1_770.0,
        geometry: LineString::from(stops.to_vec()),
        waypoints: stops
            .iter()
            .map(|location| TripWaypoint {
                location: *location,
                name: String::new(),
            })
            .collect(),
    }
}
