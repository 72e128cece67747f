//! Site catalogue sources.
//!
//! Both sources read the same JSON array of [`SiteRecord`]s: the catalogue
//! API serves it at `{base}/sitios`, and [`FileSiteCatalog`] reads a saved
//! copy from disk.
//!
//! ```no_run
//! use smartrural_core::SiteCatalog;
//! use smartrural_data::catalog::HttpSiteCatalog;
//!
//! let catalog = HttpSiteCatalog::new("http://localhost:5000")?;
//! for site in catalog.fetch_sites()? {
//!     println!("{}", site.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod api;
mod file;
mod http;

pub use api::{SiteRecord, parse_sites};
pub use file::FileSiteCatalog;
pub use http::{HttpSiteCatalog, HttpSiteCatalogConfig};
