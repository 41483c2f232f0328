//! Error types emitted by the Journeo CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use journeo_core::{PlanError, TripRequestValidationError};
use journeo_data::CatalogLoadError;
use journeo_data::model::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the Journeo CLI.
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
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The model planner needs an API key that is not set.
    #[error("the model planner requires {env} to be set")]
    MissingApiKey {
        /// Environment variable holding the key.
        env: &'static str,
    },
    /// Loading the places catalog failed.
    #[error("failed to load catalog from {path:?}: {source}")]
    LoadCatalog {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Loader failure.
        #[source]
        source: CatalogLoadError,
    },
    /// Constructing the model client failed.
    #[error("failed to build model client: {0}")]
    BuildModelClient(#[source] ClientBuildError),
    /// Opening the trip request file failed.
    #[error("failed to open trip request at {path:?}: {source}")]
    OpenTripRequest {
        /// Request location.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Trip request JSON could not be decoded.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseTripRequest {
        /// Request location.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The trip request payload failed validation.
    #[error("trip request in {path:?} failed validation: {source}")]
    InvalidTripRequest {
        /// Request location.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: TripRequestValidationError,
    },
    /// The planner could not produce a trip.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner failure.
        #[source]
        source: PlanError,
    },
    /// Serialising the trip plan failed.
    #[error("failed to serialise trip plan: {0}")]
    SerialiseTripPlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write trip plan: {0}")]
    WritePlanOutput(#[source] std::io::Error),
    /// Binding or running the HTTP server failed.
    #[error("HTTP server on {address} failed: {source}")]
    Serve {
        /// `host:port` the server was bound to.
        address: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
