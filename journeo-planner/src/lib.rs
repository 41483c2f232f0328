//! Greedy trip planner for Journeo.
//!
//! This crate provides [`GreedyTripPlanner`], the default implementation of
//! the [`TripPlanner`](journeo_core::TripPlanner) trait. A request flows
//! through four stages, each exposed on its own so callers and tests can
//! drive them directly:
//!
//! 1. [`filter_candidates`] keeps catalog records whose category was
//!    requested and which lie within the distance range.
//! 2. [`select_within_budget`] walks candidates nearest-first and keeps each
//!    one whose travel and visit time still fits the budget.
//! 3. [`order_nearest_neighbour`] turns the selection into a visiting order
//!    by always heading to the closest remaining stop.
//! 4. [`assemble_trip`] packages the stops and totals into a
//!    [`TripPlan`](journeo_core::TripPlan).
//!
//! Both the selection and the ordering are greedy heuristics. They are
//! deterministic: every tie is broken by catalog order.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assemble;
mod filter;
mod order;
mod planner;
mod select;

pub use assemble::assemble_trip;
pub use filter::filter_candidates;
pub use order::order_nearest_neighbour;
pub use planner::{GreedyPlannerConfig, GreedyTripPlanner};
pub use select::{Selection, select_within_budget};
