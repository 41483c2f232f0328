//! Tests for the `GreedyTripPlanner`.

use std::sync::Arc;

use super::*;
use geo::Coord;
use journeo_core::test_support::{poi, poi_north_of};
use journeo_core::{MemoryCatalog, TripRequestValidationError};
use rstest::{fixture, rstest};

const START: Coord<f64> = Coord {
    x: 78.1198,
    y: 9.9252,
};

#[fixture]
fn madurai() -> MemoryCatalog {
    MemoryCatalog::with_pois([
        poi_north_of(1, "Meenakshi Amman Temple", "temple", START, 2.0, 30),
        poi_north_of(2, "Eco Park", "park", START, 4.0, 20),
    ])
}

fn names(plan: &TripPlan) -> Vec<&str> {
    plan.stops.iter().map(|c| c.poi.name.as_str()).collect()
}

#[rstest]
fn both_stops_fit_an_hour(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request = TripRequest::new(START, ["temple", "park"], 60);

    let plan = planner.plan(&request).expect("plan should succeed");

    assert_eq!(names(&plan), ["Meenakshi Amman Temple", "Eco Park"]);
    assert!((plan.total_duration_minutes - 59.0).abs() < 1e-9);
    assert!((plan.return_travel_minutes - 9.0).abs() < 1e-9);
}

#[rstest]
fn tight_budget_has_no_eligible_stops(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request = TripRequest::new(START, ["temple", "park"], 10);

    assert_eq!(planner.plan(&request), Err(PlanError::NoEligibleStops));
}

#[rstest]
fn short_range_excludes_matching_temple(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request = TripRequest::new(START, ["temple"], 240).with_distance_range(1.0);

    assert_eq!(planner.plan(&request), Err(PlanError::NoEligibleStops));
}

#[rstest]
fn tied_stops_follow_catalog_order() {
    let catalog = MemoryCatalog::with_pois([
        poi(10, "Gandhi Museum", "museum", 9.93, 78.1198),
        poi(11, "Palace Museum", "museum", 9.93, 78.1198),
        poi(12, "Art Museum", "museum", 9.93, 78.1198),
    ]);
    let planner = GreedyTripPlanner::new(catalog);
    let request = TripRequest::new(START, ["museum"], 180);

    let plan = planner.plan(&request).expect("plan should succeed");
    let ids: Vec<u64> = plan.stops.iter().map(|c| c.poi.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[rstest]
fn repeated_runs_are_identical(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request = TripRequest::new(START, ["temple", "park"], 90);

    let first = planner.plan(&request).expect("plan should succeed");
    let second = planner.plan(&request).expect("plan should succeed");
    assert_eq!(first, second);
}

#[rstest]
fn start_label_and_location_are_echoed(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request =
        TripRequest::new(START, ["park"], 60).with_start_location("Villapuram, Madurai");

    let plan = planner.plan(&request).expect("plan should succeed");
    assert_eq!(plan.start_location.as_deref(), Some("Villapuram, Madurai"));
    assert_eq!(plan.user_location, START);
}

#[rstest]
fn invalid_coordinates_are_rejected_before_planning(madurai: MemoryCatalog) {
    let planner = GreedyTripPlanner::new(madurai);
    let request = TripRequest::new(Coord { x: 200.0, y: 9.9 }, ["park"], 60);

    let err = planner.plan(&request).expect_err("longitude is invalid");
    assert!(matches!(
        err,
        PlanError::InvalidRequest(TripRequestValidationError::LongitudeOutOfRange { .. })
    ));
}

#[rstest]
fn slower_speed_shrinks_the_itinerary(madurai: MemoryCatalog) {
    // At 10 km/h the temple costs 42 minutes and the park a further 44.
    let config = GreedyPlannerConfig {
        average_speed_kmh: 10.0,
    };
    let planner = GreedyTripPlanner::with_config(madurai, config);
    let request = TripRequest::new(START, ["temple", "park"], 60);

    let plan = planner.plan(&request).expect("plan should succeed");
    assert_eq!(names(&plan), ["Meenakshi Amman Temple"]);
    assert!((plan.total_duration_minutes - 42.0).abs() < 1e-9);
}

#[rstest]
fn shared_catalog_serves_planner(madurai: MemoryCatalog) {
    let shared: Arc<dyn PoiCatalog> = Arc::new(madurai);
    let planner: Box<dyn TripPlanner> = Box::new(GreedyTripPlanner::new(shared));
    let request = TripRequest::new(START, ["temple"], 45);

    let plan = planner.plan(&request).expect("plan should succeed");
    assert_eq!(names(&plan), ["Meenakshi Amman Temple"]);
}

#[rstest]
fn accessors_expose_catalog_and_config(madurai: MemoryCatalog) {
    let default_planner = GreedyTripPlanner::new(madurai.clone());
    assert_eq!(default_planner.config(), &GreedyPlannerConfig::default());

    let config = GreedyPlannerConfig {
        average_speed_kmh: 25.0,
    };
    let planner = GreedyTripPlanner::with_config(madurai, config);
    assert!((planner.config().average_speed_kmh - 25.0).abs() < f64::EPSILON);
    assert_eq!(planner.catalog().len(), 2);
}
