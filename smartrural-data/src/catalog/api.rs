//! Wire format of the site catalogue API.

use geo::Coord;
use serde::{Deserialize, Serialize};
use smartrural_core::{CatalogError, Site};

/// One site as served by `GET /sitios`.
///
/// Optional text fields arrive as empty strings when unset; they are mapped
/// to `None` on conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub nombre: String,
    /// Free-text description.
    #[serde(default)]
    pub descripcion: String,
    /// Category label.
    #[serde(default)]
    pub categoria: Option<String>,
    /// Road condition label.
    #[serde(default)]
    pub estado_via: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub imagen: Option<String>,
    /// Estimated accessibility label.
    #[serde(default)]
    pub accesibilidad: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl SiteRecord {
    /// Convert into a domain [`Site`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRecord`] when either coordinate is not
    /// finite.
    pub fn into_site(self) -> Result<Site, CatalogError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(CatalogError::InvalidRecord {
                id: self.id,
                message: format!("non-finite coordinates ({}, {})", self.lat, self.lon),
            });
        }
        Ok(Site {
            id: self.id,
            name: self.nombre,
            description: self.descripcion,
            category: non_empty(self.categoria),
            road_condition: non_empty(self.estado_via),
            image_url: non_empty(self.imagen),
            accessibility: non_empty(self.accesibilidad),
            location: Coord {
                x: self.lon,
                y: self.lat,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Parse a JSON array of [`SiteRecord`]s into sites, preserving order.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed JSON and
/// [`CatalogError::InvalidRecord`] for the first unusable record.
pub fn parse_sites(json: &str) -> Result<Vec<Site>, CatalogError> {
    let records: Vec<SiteRecord> =
        serde_json::from_str(json).map_err(|err| CatalogError::Parse {
            message: err.to_string(),
        })?;
    records.into_iter().map(SiteRecord::into_site).collect()
}
