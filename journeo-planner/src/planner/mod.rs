//! `GreedyTripPlanner`: the filter, select, order and assemble pipeline.

use journeo_core::{
    DEFAULT_TRAVEL_SPEED_KMH, PlanError, PoiCatalog, TripPlan, TripPlanner, TripRequest,
};

use crate::{assemble_trip, filter_candidates, order_nearest_neighbour, select_within_budget};

/// Configuration for [`GreedyTripPlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyPlannerConfig {
    /// Average travel speed used to turn distances into minutes.
    pub average_speed_kmh: f64,
}

impl Default for GreedyPlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_TRAVEL_SPEED_KMH,
        }
    }
}

/// Deterministic planner built from greedy heuristics.
///
/// The planner holds a read-only catalog and no per-request state, so one
/// instance may serve any number of concurrent requests.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use journeo_core::test_support::poi_north_of;
/// use journeo_core::{MemoryCatalog, TripPlanner, TripRequest};
/// use journeo_planner::GreedyTripPlanner;
///
/// let start = Coord { x: 78.1198, y: 9.9252 };
/// let catalog = MemoryCatalog::with_pois([
///     poi_north_of(0, "Meenakshi Amman Temple", "temple", start, 2.0, 30),
///     poi_north_of(1, "Eco Park", "park", start, 4.0, 20),
/// ]);
/// let planner = GreedyTripPlanner::new(catalog);
///
/// let plan = planner
///     .plan(&TripRequest::new(start, ["temple", "park"], 60))
///     .expect("both stops fit");
/// assert_eq!(plan.stops.len(), 2);
/// assert!((plan.total_duration_minutes - 59.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyTripPlanner<C>
where
    C: PoiCatalog,
{
    catalog: C,
    config: GreedyPlannerConfig,
}

impl<C> GreedyTripPlanner<C>
where
    C: PoiCatalog,
{
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, GreedyPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(catalog: C, config: GreedyPlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Borrow the catalog the planner searches.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Borrow the active configuration.
    #[must_use]
    pub const fn config(&self) -> &GreedyPlannerConfig {
        &self.config
    }
}

impl<C> TripPlanner for GreedyTripPlanner<C>
where
    C: PoiCatalog,
{
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        request.validate()?;

        let candidates = filter_candidates(
            &self.catalog,
            request.user_location,
            &request.interests,
            request.distance_range_km,
            self.config.average_speed_kmh,
        );
        let selection = select_within_budget(candidates, request.available_time_minutes);
        if selection.is_empty() {
            log::info!(
                "no stops fit {} minutes within {} km",
                request.available_time_minutes,
                request.distance_range_km
            );
            return Err(PlanError::NoEligibleStops);
        }

        let ordered = order_nearest_neighbour(selection.stops, request.user_location);
        let plan = assemble_trip(request, selection.total_minutes, ordered)?;
        log::debug!(
            "planned {} stops totalling {:.2} minutes",
            plan.stops.len(),
            plan.total_duration_minutes
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests;
