//! Retrieve the site catalogue from an external source.

use thiserror::Error;

use crate::Site;

/// Errors from [`SiteCatalog::fetch_sites`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalogue service could not be reached.
    #[error("failed to reach site catalogue at {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("site catalogue request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("site catalogue at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was not a list of site records.
    #[error("failed to parse site catalogue: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// A record decoded but cannot describe a site.
    #[error("site {id} is invalid: {message}")]
    InvalidRecord {
        /// Identifier of the offending record.
        id: String,
        /// What was wrong with it.
        message: String,
    },
    /// A local catalogue file could not be read.
    #[error("failed to read site catalogue from {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// I/O error description.
        message: String,
    },
}

/// Source of the site catalogue.
///
/// One call fetches the whole list; there is no pagination.
pub trait SiteCatalog {
    /// Return every site in display order.
    fn fetch_sites(&self) -> Result<Vec<Site>, CatalogError>;
}
