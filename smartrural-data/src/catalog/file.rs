//! Catalogue read from a local JSON file.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use smartrural_core::{CatalogError, Site, SiteCatalog};

use super::api::parse_sites;

/// [`SiteCatalog`] reading a saved `/sitios` response from disk.
///
/// The file is re-read on every fetch so edits are picked up on retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSiteCatalog {
    path: Utf8PathBuf,
}

impl FileSiteCatalog {
    /// Read sites from `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this catalogue.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SiteCatalog for FileSiteCatalog {
    fn fetch_sites(&self) -> Result<Vec<Site>, CatalogError> {
        debug!("reading site catalogue from {}", self.path);
        let contents =
            smartrural_fs::read_utf8_file(&self.path).map_err(|err| CatalogError::Io {
                path: self.path.to_string(),
                message: err.to_string(),
            })?;
        parse_sites(&contents)
    }
}
