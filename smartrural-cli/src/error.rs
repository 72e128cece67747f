//! Error types emitted by the SmartRural CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use smartrural_core::PlannerError;
use smartrural_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the SmartRural CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable name.
        env: &'static str,
    },
    /// Two mutually exclusive options were both supplied.
    #[error("--{first} cannot be combined with --{second}")]
    ConflictingArguments {
        /// First flag name.
        first: &'static str,
        /// Second flag name.
        second: &'static str,
    },
    /// A coordinate option is not `LAT,LON`.
    #[error("{field} value {value:?} is not a LAT,LON pair: {reason}")]
    InvalidCoordinate {
        /// Flag name.
        field: &'static str,
        /// Raw value.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} client for {url:?}: {source}")]
    BuildClient {
        /// Which service the client talks to.
        service: &'static str,
        /// Configured URL.
        url: String,
        /// Underlying build failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected an action or a remote call failed.
    #[error(transparent)]
    Planner(#[from] PlannerError),
    /// Serializing the trip summary failed.
    #[error("failed to serialize trip summary: {0}")]
    SerializeSummary(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
