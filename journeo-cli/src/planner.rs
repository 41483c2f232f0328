//! Planner selection shared by the `plan` and `serve` subcommands.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use journeo_core::TripPlanner;
use journeo_data::{ModelTripPlanner, OpenRouterClient, OpenRouterConfig, load_catalog};
use journeo_planner::GreedyTripPlanner;
use serde::{Deserialize, Serialize};

use crate::{ARG_CATALOG, CliError};

/// Environment variable holding the model service API key.
pub(crate) const ENV_API_KEY: &str = "OPENROUTER_API_KEY";

/// Which planner answers trip requests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlannerKind {
    /// Filter, select and order places from the local catalog.
    #[default]
    Greedy,
    /// Ask a hosted language model for the itinerary.
    Model,
}

/// Resolved planner options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannerSettings {
    pub(crate) kind: PlannerKind,
    /// Places catalog; required by the greedy planner.
    pub(crate) catalog: Option<Utf8PathBuf>,
    pub(crate) model: Option<String>,
    pub(crate) model_endpoint: Option<String>,
}

impl PlannerSettings {
    /// Combine merged options, insisting on a catalog for the greedy planner.
    pub(crate) fn resolve(
        kind: Option<PlannerKind>,
        catalog: Option<Utf8PathBuf>,
        model: Option<String>,
        model_endpoint: Option<String>,
        catalog_env: &'static str,
    ) -> Result<Self, CliError> {
        let kind = kind.unwrap_or_default();
        if kind == PlannerKind::Greedy && catalog.is_none() {
            return Err(CliError::MissingArgument {
                field: ARG_CATALOG,
                env: catalog_env,
            });
        }
        Ok(Self {
            kind,
            catalog,
            model,
            model_endpoint,
        })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.catalog {
            Some(catalog) => require_existing(catalog, ARG_CATALOG),
            None => Ok(()),
        }
    }
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match journeo_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
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

/// Builds the planner for the current invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Arc<dyn TripPlanner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Arc<dyn TripPlanner>, CliError> {
        match settings.kind {
            PlannerKind::Greedy => build_greedy(settings),
            PlannerKind::Model => build_model(settings),
        }
    }
}

fn build_greedy(settings: &PlannerSettings) -> Result<Arc<dyn TripPlanner>, CliError> {
    let path = settings
        .catalog
        .as_deref()
        .ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: crate::ENV_PLAN_CATALOG,
        })?;
    let catalog = load_catalog(path).map_err(|source| CliError::LoadCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Arc::new(GreedyTripPlanner::new(catalog)))
}

fn build_model(settings: &PlannerSettings) -> Result<Arc<dyn TripPlanner>, CliError> {
    let api_key = std::env::var(ENV_API_KEY)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(CliError::MissingApiKey { env: ENV_API_KEY })?;
    let mut config = OpenRouterConfig::new(api_key);
    if let Some(model) = &settings.model {
        config = config.with_model(model.clone());
    }
    if let Some(endpoint) = &settings.model_endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    log::info!("using model {} at {}", config.model, config.endpoint);
    let client = OpenRouterClient::with_config(config).map_err(CliError::BuildModelClient)?;
    Ok(Arc::new(ModelTripPlanner::new(client)))
}
