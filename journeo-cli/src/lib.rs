//! Command-line interface for the Journeo trip engine.
//!
//! Two subcommands share one planner set-up:
//!
//! - `journeo plan <request.json>` plans a single trip and prints the
//!   response envelope as JSON.
//! - `journeo serve` loads the planner once and answers
//!   `POST /api/generate-trip` over HTTP.
//!
//! Options layer CLI flags over `JOURNEO_*` environment variables and
//! configuration files through `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;
mod planner;
mod serve;

pub use error::CliError;
pub use planner::PlannerKind;

const ARG_CATALOG: &str = "catalog";
const ARG_PLANNER: &str = "planner";
const ARG_MODEL: &str = "model";
const ARG_MODEL_ENDPOINT: &str = "model-endpoint";
const ARG_PLAN_REQUEST: &str = "request";
const ARG_SERVE_HOST: &str = "host";
const ARG_SERVE_PORT: &str = "port";
const ENV_PLAN_CATALOG: &str = "JOURNEO_CMDS_PLAN_CATALOG";
const ENV_PLAN_REQUEST: &str = "JOURNEO_CMDS_PLAN_REQUEST_PATH";
const ENV_SERVE_CATALOG: &str = "JOURNEO_CMDS_SERVE_CATALOG";

/// Run the Journeo CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration, planning or
/// serving fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Serve(args) => serve::run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "journeo",
    about = "Plan short sightseeing trips from a catalog of places",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan one trip from a JSON request file.
    Plan(plan::PlanArgs),
    /// Serve the trip generation endpoint over HTTP.
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests;
