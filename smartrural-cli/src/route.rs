//! `route` command: plan and summarise an optimised trip.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::warn;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use smartrural_core::{RoutePlanner, TripSummary};
use smartrural_data::{DEFAULT_OSRM_BASE_URL, DEFAULT_TIMEOUT, routing::DEFAULT_PROFILE};

use crate::view::TerminalView;
use crate::{
    ARG_API_BASE, ARG_DESTINATION, ARG_FORMAT, ARG_GEOLOCATE, ARG_GEOLOCATION_URL,
    ARG_OSRM_BASE_URL, ARG_ORIGIN, ARG_POSITION, ARG_PROFILE, ARG_SITES_FILE, ARG_TIMEOUT_SECS,
    ARG_WAYPOINT, CatalogSource, CliError, ENV_DESTINATION, OriginChoice, PositionChoice,
    RoutingSettings, Services, parse_lat_lon,
};

/// Output rendering for the `route` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Map transcript followed by the summary.
    #[default]
    Text,
    /// The trip summary as pretty-printed JSON.
    Json,
}

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan an optimised trip from an origin through the chosen \
                 waypoints to a destination site. The origin is either a \
                 LAT,LON pair or the device position. Options can come from \
                 CLI flags, configuration files, or environment variables.",
    about = "Plan an optimised route"
)]
#[ortho_config(prefix = "SMARTRURAL")]
pub(crate) struct RouteArgs {
    /// Identifier of the final destination site.
    #[arg(long = ARG_DESTINATION, value_name = "id")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Identifier of a site to visit on the way; repeat for several.
    #[arg(long = ARG_WAYPOINT, value_name = "id")]
    #[serde(default)]
    pub(crate) waypoint: Vec<String>,
    /// Start from this LAT,LON position.
    #[arg(long = ARG_ORIGIN, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Start from the device position.
    #[arg(long = ARG_GEOLOCATE)]
    #[serde(default)]
    pub(crate) geolocate: bool,
    /// Device position reported to geolocation, as LAT,LON.
    #[arg(long = ARG_POSITION, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) position: Option<String>,
    /// JSON endpoint answering with the device position.
    #[arg(long = ARG_GEOLOCATION_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geolocation_url: Option<String>,
    /// Base URL of the catalogue API.
    #[arg(long = ARG_API_BASE, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base: Option<String>,
    /// Saved `/sitios` JSON response to read instead of the API.
    #[arg(long = ARG_SITES_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) sites_file: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server.
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Network timeout in seconds for catalogue and routing requests.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) catalog: CatalogSource,
    pub(crate) destination: String,
    pub(crate) waypoints: Vec<String>,
    pub(crate) origin: OriginChoice,
    pub(crate) routing: RoutingSettings,
    pub(crate) format: OutputFormat,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let destination = args
            .destination
            .filter(|id| !id.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_DESTINATION,
                env: ENV_DESTINATION,
            })?;
        let catalog = CatalogSource::resolve(args.api_base, args.sites_file)?;
        let origin = resolve_origin(
            args.origin.as_deref(),
            args.geolocate,
            args.position.as_deref(),
            args.geolocation_url,
        )?;
        let routing = RoutingSettings {
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned()),
            profile: args.profile.unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
            timeout: args
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        };

        Ok(Self {
            catalog,
            destination,
            waypoints: args.waypoint,
            origin,
            routing,
            format: args.format.unwrap_or_default(),
        })
    }
}

fn resolve_origin(
    origin: Option<&str>,
    geolocate: bool,
    position: Option<&str>,
    geolocation_url: Option<String>,
) -> Result<OriginChoice, CliError> {
    if let Some(origin) = origin {
        if geolocate {
            return Err(CliError::ConflictingArguments {
                first: ARG_ORIGIN,
                second: ARG_GEOLOCATE,
            });
        }
        return Ok(OriginChoice::Picked(parse_lat_lon(ARG_ORIGIN, origin)?));
    }
    if !geolocate {
        return Ok(OriginChoice::Unset);
    }
    let choice = match (position, geolocation_url) {
        (Some(_), Some(_)) => {
            return Err(CliError::ConflictingArguments {
                first: ARG_POSITION,
                second: ARG_GEOLOCATION_URL,
            });
        }
        (Some(position), None) => PositionChoice::Fixed(parse_lat_lon(ARG_POSITION, position)?),
        (None, Some(url)) => PositionChoice::Endpoint(url),
        (None, None) => PositionChoice::Unavailable,
    };
    Ok(OriginChoice::Geolocate(choice))
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    services: &dyn Services,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.catalog.validate()?;

    let catalog = services.catalog(&config.catalog, config.routing.timeout)?;
    let trip_planner = services.trip_planner(&config.routing)?;
    let position_choice = match &config.origin {
        OriginChoice::Geolocate(choice) => choice.clone(),
        OriginChoice::Unset | OriginChoice::Picked(_) => PositionChoice::Unavailable,
    };
    let position = services.position_source(&position_choice)?;

    let mut planner = RoutePlanner::new(TerminalView::default());
    let outcome = planner
        .load_catalog(catalog.as_ref())
        .and_then(|_| {
            apply_selection(&mut planner, &config);
            planner.calculate(position.as_ref(), trip_planner.as_ref())
        });

    match config.format {
        OutputFormat::Text => planner.view().write_to(writer)?,
        OutputFormat::Json => {
            if let Ok(summary) = &outcome {
                write_summary_json(writer, summary)?;
            }
        }
    }
    outcome?;
    Ok(())
}

fn apply_selection(planner: &mut RoutePlanner<TerminalView>, config: &RouteConfig) {
    planner.select_destination(Some(&config.destination));
    for id in &config.waypoints {
        if planner.catalog().find(id).is_none() {
            warn!("ignoring waypoint {id}: not in the site catalogue");
            continue;
        }
        planner.set_waypoint(id, true);
    }
    match &config.origin {
        OriginChoice::Picked(location) => planner.pick_origin(*location),
        OriginChoice::Geolocate(_) => planner.set_geolocation(true),
        OriginChoice::Unset => {}
    }
}

fn write_summary_json(writer: &mut dyn Write, summary: &TripSummary) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(summary).map_err(CliError::SerializeSummary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
