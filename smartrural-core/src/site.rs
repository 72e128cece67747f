//! Tourist sites and the ordered catalogue that holds them.

use geo::Coord;

/// Image shown on a site card when the catalogue has none.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x180";

/// A point of interest published by the site catalogue.
///
/// Sites are immutable for the lifetime of a session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use smartrural_core::Site;
///
/// let site = Site::new("a1", "Cascada", Coord { x: -80.05, y: -4.01 });
/// assert_eq!(site.name, "Cascada");
/// assert!(site.category.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    /// Opaque identifier assigned by the catalogue.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category label, e.g. "natural" or "cultural".
    pub category: Option<String>,
    /// Road condition label for the access road.
    pub road_condition: Option<String>,
    /// Image URL for the browsing card.
    pub image_url: Option<String>,
    /// Accessibility estimate attached by the catalogue ("alta", "media", "baja").
    pub accessibility: Option<String>,
    /// Position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
}

impl Site {
    /// Construct a site with an empty description and no optional metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: None,
            road_condition: None,
            image_url: None,
            accessibility: None,
            location,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Image URL for the card, falling back to [`PLACEHOLDER_IMAGE_URL`].
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}

/// The ordered list of sites loaded for the session.
///
/// Order matches the catalogue response and drives display order for
/// markers, cards and destination options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sites: Vec<Site>,
}

impl Catalog {
    /// Wrap the sites in the order they were published.
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the catalogue holds no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Iterate in catalogue order.
    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Site at a display index.
    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Look a site up by identifier.
    pub fn find(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Site closest to `coord` under planar Euclidean distance in degrees.
    ///
    /// Linear scan; ties resolve to the earliest site in catalogue order.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use smartrural_core::{Catalog, Site};
    ///
    /// let catalog = Catalog::new(vec![
    ///     Site::new("a", "A", Coord { x: 0.0, y: 0.0 }),
    ///     Site::new("b", "B", Coord { x: 1.0, y: 1.0 }),
    /// ]);
    /// let nearest = catalog.nearest(Coord { x: 0.9, y: 0.8 });
    /// assert_eq!(nearest.map(|site| site.id.as_str()), Some("b"));
    /// ```
    pub fn nearest(&self, coord: Coord<f64>) -> Option<&Site> {
        self.nearest_with_distance(coord).map(|(site, _)| site)
    }

    /// As [`Catalog::nearest`], rejecting a match farther than `max_distance`.
    ///
    /// `None` for `max_distance` means any distance is accepted.
    pub fn nearest_within(&self, coord: Coord<f64>, max_distance: Option<f64>) -> Option<&Site> {
        let (site, distance) = self.nearest_with_distance(coord)?;
        match max_distance {
            Some(limit) if distance > limit => None,
            _ => Some(site),
        }
    }

    fn nearest_with_distance(&self, coord: Coord<f64>) -> Option<(&Site, f64)> {
        let mut best: Option<(&Site, f64)> = None;
        for site in &self.sites {
            let distance = planar_distance(site.location, coord);
            // Strict comparison keeps the first site on ties.
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((site, distance));
            }
        }
        best
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Euclidean distance between two coordinates in degree space.
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
