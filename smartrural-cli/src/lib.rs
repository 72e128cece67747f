//! Command-line front end for the SmartRural route planner.
#![forbid(unsafe_code)]

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use geo::Coord;
use smartrural_core::{
    FixedPositionSource, NoPositionSource, PositionSource, SiteCatalog, TripPlanner,
};
use smartrural_data::{
    FileSiteCatalog, HttpPositionSource, HttpSiteCatalog, HttpSiteCatalogConfig, OsrmTripPlanner,
    OsrmTripPlannerConfig,
};

mod error;
mod route;
mod sites;
mod view;

pub use error::CliError;

use route::RouteArgs;
use sites::SitesArgs;

const ARG_API_BASE: &str = "api-base";
const ARG_SITES_FILE: &str = "sites-file";
const ARG_DESTINATION: &str = "destination";
const ARG_WAYPOINT: &str = "waypoint";
const ARG_ORIGIN: &str = "origin";
const ARG_GEOLOCATE: &str = "geolocate";
const ARG_POSITION: &str = "position";
const ARG_GEOLOCATION_URL: &str = "geolocation-url";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_PROFILE: &str = "profile";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_FORMAT: &str = "format";
const ENV_DESTINATION: &str = "SMARTRURAL_CMDS_ROUTE_DESTINATION";

/// Catalogue API used when neither `--api-base` nor `--sites-file` is set.
const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Run the SmartRural CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    let services = DefaultServices;
    match cli.command {
        Command::Sites(args) => sites::run_sites_with(args, &services, &mut stdout),
        Command::Route(args) => route::run_route_with(args, &services, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "smartrural",
    about = "Browse rural tourist sites and plan optimised routes between them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the site catalogue as markers, cards and destination options.
    Sites(SitesArgs),
    /// Plan an optimised route through chosen sites.
    Route(RouteArgs),
}

/// Where the site catalogue comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogSource {
    /// Catalogue API base URL.
    Api(String),
    /// Saved `/sitios` response on disk.
    File(Utf8PathBuf),
}

impl CatalogSource {
    /// Resolve the merged `--api-base` / `--sites-file` pair.
    pub(crate) fn resolve(
        api_base: Option<String>,
        sites_file: Option<Utf8PathBuf>,
    ) -> Result<Self, CliError> {
        match (api_base, sites_file) {
            (Some(_), Some(_)) => Err(CliError::ConflictingArguments {
                first: ARG_API_BASE,
                second: ARG_SITES_FILE,
            }),
            (None, Some(path)) => Ok(Self::File(path)),
            (api_base, None) => Ok(Self::Api(
                api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
            )),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CliError> {
        match self {
            Self::Api(_) => Ok(()),
            Self::File(path) => require_existing(path, ARG_SITES_FILE),
        }
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match smartrural_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse a `LAT,LON` pair into a `Coord` (`x = lon`, `y = lat`).
pub(crate) fn parse_lat_lon(field: &'static str, value: &str) -> Result<Coord<f64>, CliError> {
    let invalid = |reason| CliError::InvalidCoordinate {
        field,
        value: value.to_owned(),
        reason,
    };
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| invalid("expected a comma"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid("latitude is not a number"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| invalid("longitude is not a number"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid("latitude must be within -90..=90"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid("longitude must be within -180..=180"));
    }
    Ok(Coord { x: lon, y: lat })
}

/// How the route origin is obtained.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OriginChoice {
    /// No origin configured; the planner asks for one.
    Unset,
    /// A coordinate picked up front, as if clicked on the map.
    Picked(Coord<f64>),
    /// Geolocate the device.
    Geolocate(PositionChoice),
}

/// Backing source for geolocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PositionChoice {
    /// A configured device position.
    Fixed(Coord<f64>),
    /// A JSON geolocation endpoint.
    Endpoint(String),
    /// No capability available.
    Unavailable,
}

/// Settings for the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutingSettings {
    pub(crate) osrm_base_url: String,
    pub(crate) profile: String,
    pub(crate) timeout: Duration,
}

/// Builds the adapters a command talks to.
pub(crate) trait Services {
    fn catalog(
        &self,
        source: &CatalogSource,
        timeout: Duration,
    ) -> Result<Box<dyn SiteCatalog>, CliError>;

    fn trip_planner(&self, settings: &RoutingSettings) -> Result<Box<dyn TripPlanner>, CliError>;

    fn position_source(
        &self,
        choice: &PositionChoice,
    ) -> Result<Box<dyn PositionSource>, CliError>;
}

/// Real HTTP and file adapters.
pub(crate) struct DefaultServices;

impl Services for DefaultServices {
    fn catalog(
        &self,
        source: &CatalogSource,
        timeout: Duration,
    ) -> Result<Box<dyn SiteCatalog>, CliError> {
        match source {
            CatalogSource::Api(base_url) => {
                let config = HttpSiteCatalogConfig::new(base_url.clone()).with_timeout(timeout);
                let catalog =
                    HttpSiteCatalog::with_config(config).map_err(|source| CliError::BuildClient {
                        service: "site catalogue",
                        url: base_url.clone(),
                        source,
                    })?;
                Ok(Box::new(catalog))
            }
            CatalogSource::File(path) => Ok(Box::new(FileSiteCatalog::new(path.clone()))),
        }
    }

    fn trip_planner(&self, settings: &RoutingSettings) -> Result<Box<dyn TripPlanner>, CliError> {
        let config = OsrmTripPlannerConfig::new(settings.osrm_base_url.clone())
            .with_profile(settings.profile.clone())
            .with_timeout(settings.timeout);
        let planner =
            OsrmTripPlanner::with_config(config).map_err(|source| CliError::BuildClient {
                service: "routing",
                url: settings.osrm_base_url.clone(),
                source,
            })?;
        Ok(Box::new(planner))
    }

    fn position_source(
        &self,
        choice: &PositionChoice,
    ) -> Result<Box<dyn PositionSource>, CliError> {
        match choice {
            PositionChoice::Fixed(location) => {
                Ok(Box::new(FixedPositionSource::new(*location)))
            }
            PositionChoice::Endpoint(url) => {
                let source =
                    HttpPositionSource::new(url.clone()).map_err(|source| CliError::BuildClient {
                        service: "geolocation",
                        url: url.clone(),
                        source,
                    })?;
                Ok(Box::new(source))
            }
            PositionChoice::Unavailable => Ok(Box::new(NoPositionSource)),
        }
    }
}

#[cfg(test)]
mod tests;
