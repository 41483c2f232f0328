//! Serve command: the trip generation endpoint over HTTP.
//!
//! `POST /api/generate-trip` takes the same JSON body as the `plan` command
//! and answers with the trip plan envelope. Failures are reported as
//! `{"error": "..."}`: request problems and "nothing nearby" with 400, model
//! and internal failures with 500. Every response carries permissive CORS
//! headers so browser front ends on other origins can call the endpoint.

use std::sync::Arc;

use actix_web::error::BlockingError;
use actix_web::http::{Method, StatusCode};
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use camino::Utf8PathBuf;
use clap::Parser;
use journeo_core::wire::{ErrorBody, TripPlanEnvelope, TripRequestDto};
use journeo_core::{PlanError, TripPlanner, TripRequest, TripRequestValidationError};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planner::{DefaultPlannerBuilder, PlannerBuilder, PlannerKind, PlannerSettings};
use crate::{
    ARG_CATALOG, ARG_MODEL, ARG_MODEL_ENDPOINT, ARG_PLANNER, ARG_SERVE_HOST, ARG_SERVE_PORT,
    CliError, ENV_SERVE_CATALOG,
};

/// Route of the trip generation endpoint.
pub(crate) const GENERATE_TRIP_PATH: &str = "/api/generate-trip";
pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_PORT: u16 = 6002;

const NO_MATCH_MESSAGE: &str = "Not enough places found within the distance range";
const MALFORMED_OUTPUT_MESSAGE: &str = "Invalid JSON format from AI";
const MODEL_FAILURE_MESSAGE: &str = "Failed to generate trip plan";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the planner once and answer POST /api/generate-trip. \
                 Use --planner model to delegate planning to a hosted \
                 language model; its API key is read from OPENROUTER_API_KEY.",
    about = "Serve the trip generation endpoint"
)]
#[ortho_config(prefix = "JOURNEO")]
pub(crate) struct ServeArgs {
    /// Places catalog (`.xlsx` workbook, `.json` rows or a SQLite `.db`).
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Planner answering requests.
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
    /// Address to bind (default `0.0.0.0`).
    #[arg(long = ARG_SERVE_HOST, value_name = "host")]
    #[serde(default)]
    pub(crate) host: Option<String>,
    /// Port to bind (default 6002).
    #[arg(long = ARG_SERVE_PORT, value_name = "port")]
    #[serde(default)]
    pub(crate) port: Option<u16>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) planner: PlannerSettings,
}

impl ServeConfig {
    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let planner = PlannerSettings::resolve(
            args.planner,
            args.catalog,
            args.model,
            args.model_endpoint,
            ENV_SERVE_CATALOG,
        )?;
        Ok(Self {
            host: args.host.unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: args.port.unwrap_or(DEFAULT_PORT),
            planner,
        })
    }
}

pub(crate) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.planner.validate_sources()?;
    let planner = DefaultPlannerBuilder.build(&config.planner)?;

    // Keep one reference here so the planner (and any runtime it owns) is
    // dropped after the actix system has stopped.
    let server_planner = Arc::clone(&planner);
    let address = config.address();
    actix_web::rt::System::new()
        .block_on(serve(&config, server_planner))
        .map_err(|source| CliError::Serve { address, source })?;
    drop(planner);
    Ok(())
}

async fn serve(config: &ServeConfig, planner: Arc<dyn TripPlanner>) -> std::io::Result<()> {
    let planner = web::Data::from(planner);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(planner.clone())
            .wrap(cors_headers())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?;
    log::info!("serving {GENERATE_TRIP_PATH} on {}", config.address());
    server.run().await
}

/// Headers allowing cross-origin calls from browser front ends.
pub(crate) fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Register the endpoint routes.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GENERATE_TRIP_PATH)
            .route(web::post().to(generate_trip))
            .route(web::method(Method::OPTIONS).to(preflight)),
    );
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn generate_trip(
    planner: web::Data<dyn TripPlanner>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let dto: TripRequestDto = serde_json::from_slice(&body)?;
    let request = TripRequest::try_from(dto)?;
    let planner = planner.into_inner();
    let plan = web::block(move || planner.plan(&request)).await??;
    log::debug!("planned trip with {} stops", plan.stops.len());
    Ok(HttpResponse::Ok().json(TripPlanEnvelope::from(&plan)))
}

/// Failures of the trip generation endpoint.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error(transparent)]
    Request(#[from] TripRequestValidationError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("planning task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ApiError {
    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Body(_) | Self::Request(_) => self.to_string(),
            Self::Plan(PlanError::InvalidRequest(source)) => source.to_string(),
            Self::Plan(PlanError::NoEligibleStops) => NO_MATCH_MESSAGE.to_owned(),
            Self::Plan(PlanError::MalformedModelOutput { .. }) => {
                MALFORMED_OUTPUT_MESSAGE.to_owned()
            }
            Self::Plan(PlanError::ModelService { .. }) => MODEL_FAILURE_MESSAGE.to_owned(),
            Self::Blocking(_) => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Body(_)
            | Self::Request(_)
            | Self::Plan(PlanError::InvalidRequest(_) | PlanError::NoEligibleStops) => {
                StatusCode::BAD_REQUEST
            }
            Self::Plan(PlanError::MalformedModelOutput { .. } | PlanError::ModelService { .. })
            | Self::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("trip generation failed: {self}");
        } else {
            log::info!("trip request rejected: {self}");
        }
        HttpResponse::build(status).json(ErrorBody::new(self.public_message()))
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(merged)
}
