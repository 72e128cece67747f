//! Sites ticked as intermediate stops.

use std::collections::HashSet;

use crate::{Catalog, Site};

/// Identifiers of the sites the user added to the route.
///
/// The stored set has no order; [`WaypointSelection::effective`] emits
/// waypoints in catalogue order so requests are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaypointSelection {
    checked: HashSet<String>,
}

impl WaypointSelection {
    /// Record a checkbox toggle.
    pub fn set(&mut self, id: impl Into<String>, checked: bool) {
        let id = id.into();
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
    }

    /// Whether the site's checkbox is ticked.
    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    /// Number of ticked sites, destination included.
    pub fn len(&self) -> usize {
        self.checked.len()
    }

    /// Whether nothing is ticked.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Untick everything.
    pub fn clear(&mut self) {
        self.checked.clear();
    }

    /// Ticked sites that become waypoints, in catalogue order.
    ///
    /// The destination is skipped even when ticked so it never appears twice
    /// in a trip request.
    pub fn effective<'a>(
        &'a self,
        catalog: &'a Catalog,
        destination_id: &'a str,
    ) -> impl Iterator<Item = &'a Site> + 'a {
        catalog
            .iter()
            .filter(move |site| site.id != destination_id && self.is_checked(&site.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn catalog() -> Catalog {
        Catalog::new(
            ["a", "b", "c", "d"]
                .into_iter()
                .map(|id| Site::new(id, id.to_uppercase(), Coord { x: 0.0, y: 0.0 }))
                .collect(),
        )
    }

    #[rstest]
    fn toggling_adds_and_removes() {
        let mut selection = WaypointSelection::default();
        selection.set("a", true);
        selection.set("b", true);
        selection.set("a", false);
        assert!(!selection.is_checked("a"));
        assert!(selection.is_checked("b"));
        assert_eq!(selection.len(), 1);
    }

    #[rstest]
    fn effective_excludes_destination_and_follows_catalog_order() {
        let catalog = catalog();
        let mut selection = WaypointSelection::default();
        for id in ["d", "b", "c"] {
            selection.set(id, true);
        }

        let ids: Vec<&str> = selection
            .effective(&catalog, "c")
            .map(|site| site.id.as_str())
            .collect();

        assert_eq!(ids, vec!["b", "d"]);
    }

    #[rstest]
    fn effective_skips_ids_missing_from_catalog() {
        let catalog = catalog();
        let mut selection = WaypointSelection::default();
        selection.set("ghost", true);
        assert_eq!(selection.effective(&catalog, "a").count(), 0);
    }

    #[rstest]
    fn clear_unticks_everything() {
        let mut selection = WaypointSelection::default();
        selection.set("a", true);
        selection.clear();
        assert!(selection.is_empty());
    }
}
