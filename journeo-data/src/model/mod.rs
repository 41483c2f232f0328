//! Trip planning delegated to a hosted language model.
//!
//! [`ModelTripPlanner`] replaces the greedy pipeline with a single chat
//! completion: it renders the request into a prompt, sends it through a
//! [`ChatClient`], pulls the outermost JSON object out of the reply and
//! decodes it into a [`TripPlan`]. Nothing about the reply is trusted:
//! missing JSON or unusable stops surface as
//! [`PlanError::MalformedModelOutput`], and transport failures as
//! [`PlanError::ModelService`].
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use journeo_core::{TripPlanner, TripRequest};
//! use journeo_data::{ModelTripPlanner, OpenRouterClient, OpenRouterConfig};
//!
//! let client = OpenRouterClient::with_config(OpenRouterConfig::new("sk-or-..."))?;
//! let planner = ModelTripPlanner::new(client);
//! let request = TripRequest::new(Coord { x: 78.0782, y: 9.8829 }, ["temple"], 90);
//! let plan = planner.plan(&request)?;
//! println!("{} stops", plan.stops.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use journeo_core::{PlanError, TripPlan, TripPlanner, TripRequest};
use thiserror::Error;

mod openrouter;
mod prompt;
mod reply;
pub mod test_support;

pub use openrouter::{ClientBuildError, OpenRouterClient, OpenRouterConfig};
pub use prompt::{build_prompt, minimum_stops};
pub use reply::{extract_json_object, parse_reply};

/// Start label used when the request does not name one.
pub const DEFAULT_START_LOCATION: &str = "Villapuram, Madurai, Tamil Nadu (Pincode: 625012)";

/// Errors raised by a [`ChatClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelClientError {
    /// The request could not be sent or the connection failed.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Endpoint that was called.
        url: String,
        /// Description of the failure.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was called.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("model service returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },
    /// The service answered, but not with a chat completion.
    #[error("unexpected model service response: {message}")]
    UnexpectedResponse {
        /// Description of the mismatch.
        message: String,
    },
}

impl From<ModelClientError> for PlanError {
    fn from(error: ModelClientError) -> Self {
        Self::ModelService {
            message: error.to_string(),
        }
    }
}

/// Sends a single-turn prompt to a chat model and returns its reply text.
///
/// Implementations block until the reply arrives.
pub trait ChatClient: Send + Sync {
    /// Complete `prompt`, returning the assistant message content.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelClientError`] when the service cannot be reached or
    /// does not produce a completion.
    fn complete(&self, prompt: &str) -> Result<String, ModelClientError>;
}

impl<C> ChatClient for std::sync::Arc<C>
where
    C: ChatClient + ?Sized,
{
    fn complete(&self, prompt: &str) -> Result<String, ModelClientError> {
        (**self).complete(prompt)
    }
}

/// Configuration for [`ModelTripPlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPlannerConfig {
    /// Label used in the prompt when the request has no start location.
    pub default_start_location: String,
}

impl Default for ModelPlannerConfig {
    fn default() -> Self {
        Self {
            default_start_location: DEFAULT_START_LOCATION.to_owned(),
        }
    }
}

/// Planner that asks a language model for the itinerary.
///
/// Unlike the greedy planner, the result is neither deterministic nor
/// guaranteed to respect the budget or distance range.
#[derive(Debug, Clone)]
pub struct ModelTripPlanner<C>
where
    C: ChatClient,
{
    client: C,
    config: ModelPlannerConfig,
}

impl<C> ModelTripPlanner<C>
where
    C: ChatClient,
{
    /// Construct a planner using default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, ModelPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(client: C, config: ModelPlannerConfig) -> Self {
        Self { client, config }
    }

    fn start_label<'a>(&'a self, request: &'a TripRequest) -> &'a str {
        request
            .start_location
            .as_deref()
            .unwrap_or(&self.config.default_start_location)
    }
}

impl<C> TripPlanner for ModelTripPlanner<C>
where
    C: ChatClient,
{
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        request.validate()?;

        let start_label = self.start_label(request);
        let prompt = build_prompt(request, start_label);
        log::debug!("requesting model plan for {start_label}");
        let reply = self.client.complete(&prompt)?;

        let mut plan = parse_reply(&reply, request)?;
        if plan.stops.is_empty() {
            return Err(PlanError::NoEligibleStops);
        }
        plan.start_location.get_or_insert_with(|| start_label.to_owned());
        log::debug!("model proposed {} stops", plan.stops.len());
        Ok(plan)
    }
}
