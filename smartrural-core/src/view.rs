//! Rendering surface driven by the [`RoutePlanner`](crate::RoutePlanner).
//!
//! A map widget, a terminal transcript and a test recorder all implement
//! [`MapView`]. Methods are infallible: rendering problems are the view's
//! concern and must not abort planner state transitions.

use geo::{Coord, LineString, Rect};

use crate::{Site, TripSummary};

/// Padding, in pixels, around a route when fitting the map to it.
pub const ROUTE_PADDING_PX: u32 = 40;

/// Zoom level used when focusing a single site.
pub const SITE_FOCUS_ZOOM: u8 = 15;

/// Presentation callbacks for the route planner.
pub trait MapView {
    /// Drop every site marker, card and destination option.
    fn clear_sites(&mut self);
    /// Place a marker for `site`.
    fn add_site_marker(&mut self, site: &Site);
    /// Append a browsing card for `site` at display `index`.
    fn add_site_card(&mut self, index: usize, site: &Site);
    /// Append `site` to the destination list.
    fn add_destination_option(&mut self, site: &Site);
    /// Centre the map on `site` and open its popup.
    fn focus_site(&mut self, site: &Site, zoom: u8);

    /// Show the origin marker at `location`, replacing any previous one.
    fn set_origin_marker(&mut self, location: Coord<f64>);
    /// Remove the origin marker if present.
    fn remove_origin_marker(&mut self);

    /// Draw a route layer.
    fn draw_route(&mut self, geometry: &LineString<f64>);
    /// Remove the route layer if present.
    fn remove_route(&mut self);
    /// Fit the viewport to `bounds`.
    fn fit_bounds(&mut self, bounds: Rect<f64>, padding_px: u32);
    /// Show the trip summary panel.
    fn show_summary(&mut self, summary: &TripSummary);
    /// Empty the trip summary panel.
    fn clear_summary(&mut self);
    /// Untick every "add to route" checkbox.
    fn uncheck_waypoints(&mut self);

    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}
