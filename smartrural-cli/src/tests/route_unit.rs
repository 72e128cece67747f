//! Focused unit tests covering route CLI configuration.

use super::*;
use route::{OutputFormat, RouteArgs, RouteConfig, config_from_layers_for_test};
use rstest::rstest;
use smartrural_data::DEFAULT_OSRM_BASE_URL;

fn args_with_destination() -> RouteArgs {
    RouteArgs {
        destination: Some("laguna".to_owned()),
        ..RouteArgs::default()
    }
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
fn converting_without_destination_errors(#[case] destination: Option<String>) {
    let args = RouteArgs {
        destination,
        ..RouteArgs::default()
    };

    match RouteConfig::try_from(args).expect_err("missing destination should error") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DESTINATION);
            assert_eq!(env, ENV_DESTINATION);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn route_config_applies_defaults() {
    let config = RouteConfig::try_from(args_with_destination()).expect("config should build");

    assert_eq!(config.destination, "laguna");
    assert!(config.waypoints.is_empty());
    assert_eq!(config.origin, OriginChoice::Unset);
    assert_eq!(config.catalog, CatalogSource::Api(DEFAULT_API_BASE.to_owned()));
    assert_eq!(config.routing.osrm_base_url, DEFAULT_OSRM_BASE_URL);
    assert_eq!(config.routing.profile, "driving");
    assert_eq!(config.routing.timeout, Duration::from_secs(30));
    assert_eq!(config.format, OutputFormat::Text);
}

#[rstest]
fn explicit_origin_becomes_picked_coordinate() {
    let args = RouteArgs {
        origin: Some("-4.1,-80.2".to_owned()),
        ..args_with_destination()
    };

    let config = RouteConfig::try_from(args).expect("config should build");

    assert_eq!(
        config.origin,
        OriginChoice::Picked(Coord { x: -80.2, y: -4.1 })
    );
}

#[rstest]
#[case(None, None, PositionChoice::Unavailable)]
#[case(
    Some("-4.2,-80.3"),
    None,
    PositionChoice::Fixed(Coord { x: -80.3, y: -4.2 })
)]
#[case(
    None,
    Some("http://localhost:8080/position"),
    PositionChoice::Endpoint("http://localhost:8080/position".to_owned())
)]
fn geolocation_picks_position_backend(
    #[case] position: Option<&str>,
    #[case] url: Option<&str>,
    #[case] expected: PositionChoice,
) {
    let args = RouteArgs {
        geolocate: true,
        position: position.map(str::to_owned),
        geolocation_url: url.map(str::to_owned),
        ..args_with_destination()
    };

    let config = RouteConfig::try_from(args).expect("config should build");

    assert_eq!(config.origin, OriginChoice::Geolocate(expected));
}

#[rstest]
fn position_and_endpoint_conflict() {
    let args = RouteArgs {
        geolocate: true,
        position: Some("0,0".to_owned()),
        geolocation_url: Some("http://localhost:8080/position".to_owned()),
        ..args_with_destination()
    };

    match RouteConfig::try_from(args).expect_err("conflicting position sources") {
        CliError::ConflictingArguments { first, second } => {
            assert_eq!(first, ARG_POSITION);
            assert_eq!(second, ARG_GEOLOCATION_URL);
        }
        other => panic!("expected ConflictingArguments, found {other:?}"),
    }
}

#[rstest]
fn invalid_origin_is_reported() {
    let args = RouteArgs {
        origin: Some("somewhere".to_owned()),
        ..args_with_destination()
    };

    assert!(matches!(
        RouteConfig::try_from(args),
        Err(CliError::InvalidCoordinate {
            field: ARG_ORIGIN,
            ..
        })
    ));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "destination": 42 }));

    match config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration")
    {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "destination": "mirador",
            "osrm_base_url": "http://from-file:5000",
            "profile": "foot",
        }),
        None,
    );
    composer.push_environment(json!({
        "destination": "cascada",
        "timeout_secs": 5,
    }));
    composer.push_cli(json!({
        "destination": "laguna",
        "format": "json",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.destination, "laguna");
    assert_eq!(config.routing.osrm_base_url, "http://from-file:5000");
    assert_eq!(config.routing.profile, "foot");
    assert_eq!(config.routing.timeout, Duration::from_secs(5));
    assert_eq!(config.format, OutputFormat::Json);
}

#[rstest]
fn clap_collects_repeated_waypoints() {
    let cli = Cli::try_parse_from([
        "smartrural",
        "route",
        "--destination",
        "laguna",
        "--waypoint",
        "cascada",
        "--waypoint",
        "mirador",
        "--origin",
        "-4.1,-80.2",
    ])
    .expect("arguments parse");

    match cli.command {
        Command::Route(args) => {
            assert_eq!(args.waypoint, ["cascada", "mirador"]);
            assert_eq!(args.origin.as_deref(), Some("-4.1,-80.2"));
        }
        Command::Sites(_) => panic!("expected route command"),
    }
}
