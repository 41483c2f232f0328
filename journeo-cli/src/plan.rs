//! Plan command implementation for the Journeo CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use journeo_core::TripRequest;
use journeo_core::wire::{TripPlanEnvelope, TripRequestDto};
use journeo_data::fs::open_utf8_file;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::planner::{
    DefaultPlannerBuilder, PlannerBuilder, PlannerKind, PlannerSettings, require_existing,
};
use crate::{
    ARG_CATALOG, ARG_MODEL, ARG_MODEL_ENDPOINT, ARG_PLAN_REQUEST, ARG_PLANNER, CliError,
    ENV_PLAN_CATALOG, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a single trip. The request is a JSON file in the same \
                 shape as the HTTP endpoint body (location, latitude, \
                 longitude, interests, availableTime, distanceRange); the \
                 plan is printed to stdout as JSON.",
    about = "Plan one trip from a JSON request"
)]
#[ortho_config(prefix = "JOURNEO")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the trip request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Places catalog (`.xlsx` workbook, `.json` rows or a SQLite `.db`).
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Planner answering the request.
    #[arg(long = ARG_PLANNER, value_enum)]
    #[serde(default)]
    pub(crate) planner: Option<PlannerKind>,
    /// Model identifier for the model planner.
    #[arg(long = ARG_MODEL, value_name = "id")]
    #[serde(default)]
    pub(crate) model: Option<String>,
    /// Chat completions URL for the model planner.
    #[arg(long = ARG_MODEL_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) model_endpoint: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) planner: PlannerSettings,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        self.planner.validate_sources()
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let planner = PlannerSettings::resolve(
            args.planner,
            args.catalog,
            args.model,
            args.model_endpoint,
            ENV_PLAN_CATALOG,
        )?;
        Ok(Self {
            request_path,
            planner,
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let envelope = execute_plan(args, builder)?;
    write_plan(writer, &envelope)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
) -> Result<TripPlanEnvelope, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_trip_request(&config.request_path)?;
    let planner = builder.build(&config.planner)?;
    let plan = planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })?;
    Ok(TripPlanEnvelope::from(&plan))
}

/// Loads and validates a JSON-encoded trip request from disk.
pub(crate) fn load_trip_request(path: &Utf8Path) -> Result<TripRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenTripRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let dto: TripRequestDto =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseTripRequest {
                path: path.to_path_buf(),
                source,
            }
        })?;
    TripRequest::try_from(dto).map_err(|source| CliError::InvalidTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan(writer: &mut dyn Write, envelope: &TripPlanEnvelope) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(envelope).map_err(CliError::SerialiseTripPlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
