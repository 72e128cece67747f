//! `sites` command: render the catalogue.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use smartrural_core::RoutePlanner;
use smartrural_data::DEFAULT_TIMEOUT;

use crate::view::TerminalView;
use crate::{ARG_API_BASE, ARG_SITES_FILE, ARG_TIMEOUT_SECS, CatalogSource, CliError, Services};

/// CLI arguments for the `sites` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the site catalogue from the API or a saved JSON file \
                 and print a marker, a card and a destination option for \
                 every site.",
    about = "List the tourist site catalogue"
)]
#[ortho_config(prefix = "SMARTRURAL")]
pub(crate) struct SitesArgs {
    /// Base URL of the catalogue API (e.g. "http://localhost:5000").
    #[arg(long = ARG_API_BASE, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base: Option<String>,
    /// Saved `/sitios` JSON response to read instead of the API.
    #[arg(long = ARG_SITES_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) sites_file: Option<Utf8PathBuf>,
    /// Network timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SitesArgs {
    pub(crate) fn into_config(self) -> Result<SitesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SitesConfig::try_from(merged)
    }
}

/// Resolved `sites` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SitesConfig {
    pub(crate) catalog: CatalogSource,
    pub(crate) timeout: Duration,
}

impl TryFrom<SitesArgs> for SitesConfig {
    type Error = CliError;

    fn try_from(args: SitesArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            catalog: CatalogSource::resolve(args.api_base, args.sites_file)?,
            timeout: args
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        })
    }
}

pub(crate) fn run_sites_with(
    args: SitesArgs,
    services: &dyn Services,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.catalog.validate()?;
    let catalog = services.catalog(&config.catalog, config.timeout)?;

    let mut planner = RoutePlanner::new(TerminalView::default());
    let loaded = planner.load_catalog(catalog.as_ref());
    planner.view().write_to(writer)?;
    let count = loaded?;
    info!("listed {count} sites");
    Ok(())
}
