//! Facade crate for the Journeo trip engine.
//!
//! This crate re-exports the core domain types and exposes the greedy
//! planner, the catalog loaders and the language-model planner behind
//! feature flags.

#![forbid(unsafe_code)]

pub use journeo_core::{
    Candidate, MemoryCatalog, PlanError, PoiCatalog, PointOfInterest, TripPlan, TripPlanner,
    TripRequest, TripRequestValidationError, haversine_km, travel_time_minutes,
};

#[cfg(feature = "serde")]
pub use journeo_core::wire;

#[cfg(feature = "planner-greedy")]
pub use journeo_planner::{GreedyPlannerConfig, GreedyTripPlanner};

#[cfg(feature = "data")]
pub use journeo_data::{
    CatalogLoadError, ChatClient, ModelTripPlanner, OpenRouterClient, OpenRouterConfig,
    load_catalog,
};
