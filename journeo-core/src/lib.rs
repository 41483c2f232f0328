//! Core domain types for the Journeo trip engine.
//!
//! The crate defines the read-only POI catalog handle, trip requests and
//! plans, the great-circle distance used throughout the pipeline, and the
//! [`TripPlanner`] trait implemented by the planners in sibling crates.
//! Constructors and validators return `Result` so invalid input is
//! surfaced before any planning work happens.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidate;
pub mod catalog;
pub mod distance;
pub mod plan;
pub mod planner;
pub mod poi;
pub mod request;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
#[cfg(feature = "serde")]
pub mod wire;

pub use candidate::Candidate;
pub use catalog::{MemoryCatalog, PoiCatalog};
pub use distance::{DEFAULT_TRAVEL_SPEED_KMH, EARTH_RADIUS_KM, haversine_km, travel_time_minutes};
pub use plan::TripPlan;
pub use planner::{PlanError, TripPlanner};
pub use poi::{DEFAULT_VISIT_DURATION_MINUTES, PointOfInterest, UNKNOWN_ADDRESS, split_activities};
pub use request::{DEFAULT_DISTANCE_RANGE_KM, TripRequest, TripRequestValidationError};
