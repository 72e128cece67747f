//! Text transcript of what a map front end would show.

use std::io::Write;

use geo::{Coord, LineString, Rect};
use smartrural_core::{MapView, Site, TripSummary};

use crate::CliError;

/// [`MapView`] that renders every call as a line of text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TerminalView {
    lines: Vec<String>,
}

impl TerminalView {
    #[cfg(test)]
    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn write_to(&self, writer: &mut dyn Write) -> Result<(), CliError> {
        for line in &self.lines {
            writeln!(writer, "{line}").map_err(CliError::WriteOutput)?;
        }
        Ok(())
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

fn lat_lon(coord: Coord<f64>) -> String {
    format!("{:.5}, {:.5}", coord.y, coord.x)
}

impl MapView for TerminalView {
    fn clear_sites(&mut self) {}

    fn add_site_marker(&mut self, site: &Site) {
        self.push(format!("marker: {} ({})", site.name, lat_lon(site.location)));
    }

    fn add_site_card(&mut self, index: usize, site: &Site) {
        let mut card = format!("card {}: {}", index + 1, site.name);
        if !site.description.is_empty() {
            card.push_str(&format!(" - {}", site.description));
        }
        for (label, value) in [
            ("category", &site.category),
            ("road", &site.road_condition),
            ("accessibility", &site.accessibility),
        ] {
            if let Some(value) = value {
                card.push_str(&format!(" | {label}: {value}"));
            }
        }
        card.push_str(&format!(" | image: {}", site.image_or_placeholder()));
        self.push(card);
    }

    fn add_destination_option(&mut self, site: &Site) {
        self.push(format!("destination option: {} ({})", site.id, site.name));
    }

    fn focus_site(&mut self, site: &Site, zoom: u8) {
        self.push(format!("focus: {} at zoom {zoom}", site.name));
    }

    fn set_origin_marker(&mut self, location: Coord<f64>) {
        self.push(format!("origin: {}", lat_lon(location)));
    }

    fn remove_origin_marker(&mut self) {
        self.push("origin removed".to_owned());
    }

    fn draw_route(&mut self, geometry: &LineString<f64>) {
        self.push(format!("route: {} points", geometry.0.len()));
    }

    fn remove_route(&mut self) {
        self.push("route removed".to_owned());
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, padding_px: u32) {
        self.push(format!(
            "view: ({}) to ({}) padded {padding_px}px",
            lat_lon(bounds.min()),
            lat_lon(bounds.max())
        ));
    }

    fn show_summary(&mut self, summary: &TripSummary) {
        self.lines
            .extend(summary.to_string().lines().map(str::to_owned));
    }

    fn clear_summary(&mut self) {
        self.push("summary cleared".to_owned());
    }

    fn uncheck_waypoints(&mut self) {
        self.push("waypoints cleared".to_owned());
    }

    fn alert(&mut self, message: &str) {
        self.push(format!("alert: {message}"));
    }
}
