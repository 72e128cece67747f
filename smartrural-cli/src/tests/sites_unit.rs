//! Unit tests for the `sites` command.

use super::helpers::{StubServices, write_utf8};
use super::*;
use rstest::rstest;
use sites::{SitesArgs, SitesConfig, run_sites_with};
use smartrural_core::test_support::{MemoryCatalog, StubTripPlanner, sample_trip};
use smartrural_core::{CatalogError, PlannerError};
use tempfile::TempDir;

#[rstest]
fn sites_config_defaults_timeout() {
    let config = SitesConfig::try_from(SitesArgs::default()).expect("config builds");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.catalog, CatalogSource::Api(DEFAULT_API_BASE.to_owned()));
}

#[rstest]
fn lists_every_site_in_catalogue_order() {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let path = root.join("sitios.json");
    // The stub ignores the file contents, but the path must exist.
    write_utf8(&path, b"[]");
    let args = SitesArgs {
        sites_file: Some(path),
        ..SitesArgs::default()
    };
    let mut stdout = Vec::new();

    run_sites_with(args, &StubServices::sample(), &mut stdout).expect("sites listed");

    let stdout = String::from_utf8(stdout).expect("utf-8");
    let options: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("destination option:"))
        .collect();
    assert_eq!(
        options,
        [
            "destination option: mirador (Mirador)",
            "destination option: cascada (Cascada)",
            "destination option: laguna (Laguna)",
        ]
    );
    assert_eq!(stdout.lines().filter(|line| line.starts_with("card ")).count(), 3);
}

#[rstest]
fn catalogue_failure_is_reported_and_alerted() {
    let services = StubServices::new(
        MemoryCatalog::with_error(CatalogError::Timeout {
            url: "http://localhost:5000/sitios".to_owned(),
            timeout_secs: 30,
        }),
        StubTripPlanner::with_trip(sample_trip()),
    );
    let mut stdout = Vec::new();

    let err = run_sites_with(SitesArgs::default(), &services, &mut stdout)
        .expect_err("catalogue failure");

    assert!(matches!(
        err,
        CliError::Planner(PlannerError::Catalog(CatalogError::Timeout { .. }))
    ));
    assert_eq!(
        String::from_utf8(stdout).expect("utf-8"),
        "alert: Could not load the site catalogue. Please try again.\n"
    );
}
