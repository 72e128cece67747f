//! Human-readable summary of an optimised trip.

use std::fmt;

use crate::{Catalog, Site, Trip};

/// Labels used when naming the stops of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StopLabels {
    /// Name given to the first stop.
    pub origin_label: String,
    /// Farthest an interior stop may lie from a site, in degrees, before the
    /// positional fallback label is used. `None` accepts any distance.
    pub max_snap_distance: Option<f64>,
}

impl Default for StopLabels {
    fn default() -> Self {
        Self {
            origin_label: "Origin".to_owned(),
            max_snap_distance: None,
        }
    }
}

/// Stop order, distance and duration of a rendered trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSummary {
    /// Stop names in visiting order.
    pub stops: Vec<String>,
    /// Distance in kilometres, one decimal place.
    pub distance_km: f64,
    /// Duration in whole minutes.
    pub duration_min: u64,
}

impl TripSummary {
    /// Name the stops of `trip` and round its totals.
    ///
    /// The routing service reports interior stops by coordinate only, so each
    /// one is resolved to the nearest catalogue site. Stops with no site in
    /// range become `Stop N`, counting interior stops from one.
    ///
    /// # Examples
    /// ```
    /// use geo::{Coord, LineString};
    /// use smartrural_core::{Catalog, Site, StopLabels, Trip, TripSummary};
    ///
    /// let catalog = Catalog::new(vec![Site::new("d", "Laguna", Coord { x: 1.0, y: 1.0 })]);
    /// let trip = Trip {
    ///     distance_m: 12_345.0,
    ///     duration_s: 1_530.0,
    ///     geometry: LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]),
    ///     waypoints: Vec::new(),
    /// };
    /// let destination = catalog.find("d").expect("present");
    /// let summary = TripSummary::from_trip(&trip, &catalog, destination, &StopLabels::default());
    /// assert_eq!(summary.stops, vec!["Origin", "Laguna"]);
    /// assert_eq!(summary.distance_km, 12.3);
    /// assert_eq!(summary.duration_min, 26);
    /// ```
    pub fn from_trip(
        trip: &Trip,
        catalog: &Catalog,
        destination: &Site,
        labels: &StopLabels,
    ) -> Self {
        let interior = match trip.waypoints.as_slice() {
            [_, inner @ .., _] => inner,
            _ => &[],
        };

        let mut stops = Vec::with_capacity(interior.len() + 2);
        stops.push(labels.origin_label.clone());
        stops.extend(interior.iter().enumerate().map(|(index, waypoint)| {
            catalog
                .nearest_within(waypoint.location, labels.max_snap_distance)
                .map_or_else(|| format!("Stop {}", index + 1), |site| site.name.clone())
        }));
        stops.push(destination.name.clone());

        Self {
            stops,
            distance_km: round_kilometres(trip.distance_m),
            duration_min: round_minutes(trip.duration_s),
        }
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimised order:")?;
        for (index, stop) in self.stops.iter().enumerate() {
            writeln!(f, "{}. {stop}", index + 1)?;
        }
        writeln!(f, "Total distance: {:.1} km", self.distance_km)?;
        write!(f, "Estimated duration: {} min", self.duration_min)
    }
}

/// Metres to kilometres rounded to one decimal place.
fn round_kilometres(metres: f64) -> f64 {
    (metres / 100.0).round() / 10.0
}

/// Seconds to whole minutes; negative or non-finite input yields zero.
fn round_minutes(seconds: f64) -> u64 {
    let minutes = (seconds / 60.0).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TripWaypoint;
    use geo::{Coord, LineString};
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::new(vec![
            Site::new("a", "Mirador", Coord { x: -80.05, y: -4.01 }),
            Site::new("b", "Cascada", Coord { x: -80.10, y: -4.05 }),
            Site::new("c", "Laguna", Coord { x: -80.00, y: -3.95 }),
        ])
    }

    fn waypoint(x: f64, y: f64) -> TripWaypoint {
        TripWaypoint {
            location: Coord { x, y },
            name: String::new(),
        }
    }

    fn trip(waypoints: Vec<TripWaypoint>) -> Trip {
        Trip {
            distance_m: 18_260.0,
            duration_s: 1_770.0,
            geometry: LineString::from(vec![(-80.2, -4.1), (-80.0, -3.95)]),
            waypoints,
        }
    }

    #[rstest]
    fn interior_stops_resolve_to_nearest_sites(catalog: Catalog) {
        let trip = trip(vec![
            waypoint(-80.2, -4.1),
            waypoint(-80.099, -4.051),
            waypoint(-80.049, -4.012),
            waypoint(-80.0, -3.95),
        ]);
        let destination = catalog.find("c").expect("present");

        let summary = TripSummary::from_trip(&trip, &catalog, destination, &StopLabels::default());

        assert_eq!(summary.stops, vec!["Origin", "Cascada", "Mirador", "Laguna"]);
    }

    #[rstest]
    fn distant_stops_fall_back_to_positional_labels(catalog: Catalog) {
        let trip = trip(vec![
            waypoint(-80.2, -4.1),
            waypoint(-70.0, 0.0),
            waypoint(-80.0, -3.95),
        ]);
        let destination = catalog.find("c").expect("present");
        let labels = StopLabels {
            max_snap_distance: Some(0.01),
            ..StopLabels::default()
        };

        let summary = TripSummary::from_trip(&trip, &catalog, destination, &labels);

        assert_eq!(summary.stops, vec!["Origin", "Stop 1", "Laguna"]);
    }

    #[rstest]
    fn empty_catalog_interior_uses_positional_labels() {
        let catalog = Catalog::default();
        let destination = Site::new("d", "Destino", Coord { x: 0.0, y: 0.0 });
        let trip = trip(vec![
            waypoint(0.0, 0.0),
            waypoint(0.1, 0.1),
            waypoint(0.2, 0.2),
            waypoint(0.3, 0.3),
        ]);

        let summary = TripSummary::from_trip(&trip, &catalog, &destination, &StopLabels::default());

        assert_eq!(summary.stops, vec!["Origin", "Stop 1", "Stop 2", "Destino"]);
    }

    #[rstest]
    #[case(18_260.0, 18.3)]
    #[case(18_240.0, 18.2)]
    #[case(999.0, 1.0)]
    #[case(0.0, 0.0)]
    fn distance_rounds_to_one_decimal(#[case] metres: f64, #[case] expected: f64) {
        assert!((round_kilometres(metres) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(1_770.0, 30)]
    #[case(1_769.0, 29)]
    #[case(29.0, 0)]
    #[case(-5.0, 0)]
    #[case(f64::NAN, 0)]
    fn duration_rounds_to_minutes(#[case] seconds: f64, #[case] expected: u64) {
        assert_eq!(round_minutes(seconds), expected);
    }

    #[rstest]
    fn display_lists_numbered_stops() {
        let summary = TripSummary {
            stops: vec!["Origin".to_owned(), "Laguna".to_owned()],
            distance_km: 18.3,
            duration_min: 30,
        };

        assert_eq!(
            summary.to_string(),
            "Optimised order:\n1. Origin\n2. Laguna\nTotal distance: 18.3 km\nEstimated duration: 30 min"
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_to_json() {
        let summary = TripSummary {
            stops: vec!["Origin".to_owned(), "Laguna".to_owned()],
            distance_km: 18.3,
            duration_min: 30,
        };
        let value = serde_json::to_value(&summary).expect("serialise summary");
        assert_eq!(value["duration_min"], 30);
        assert_eq!(value["stops"][1], "Laguna");
    }
}
