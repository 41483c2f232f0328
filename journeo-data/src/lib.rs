//! Data access for the Journeo trip engine.
//!
//! Responsibilities:
//! - Load the POI catalog from a spreadsheet, JSON rows or a SQLite table.
//! - Provide capability-based file helpers shared with the CLI.
//! - Host the language-model planner and its HTTP chat client.
//!
//! Boundaries:
//! - Do not encode selection or ordering rules (live in `journeo-planner`).
//! - Validate records here so the core can assume well-formed data.
//!
//! Invariants:
//! - Loaded catalogs are immutable and shared read-only.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod fs;
pub mod model;

pub use catalog::{CatalogFormat, CatalogLoadError, PlaceRecord, load_catalog};
pub use model::{
    ChatClient, ModelClientError, ModelPlannerConfig, ModelTripPlanner, OpenRouterClient,
    OpenRouterConfig,
};
