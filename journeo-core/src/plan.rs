//! Trip plans: ordered stops with aggregate timings.

use geo::Coord;

use crate::Candidate;

/// A recommended itinerary.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use journeo_core::{Candidate, PointOfInterest, TripPlan};
///
/// let poi = PointOfInterest::new(1, "Eco Park", "park", Coord { x: 0.0, y: 0.0 });
/// let plan = TripPlan {
///     start_location: Some("Villapuram".to_owned()),
///     user_location: Coord { x: 0.0, y: 0.0 },
///     total_duration_minutes: 36.0,
///     stops: vec![Candidate::new(poi, 4.0, 40.0)],
///     return_travel_minutes: 6.0,
/// };
///
/// assert_eq!(plan.stops.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// Start label copied from the request.
    pub start_location: Option<String>,
    /// Visitor position copied from the request.
    pub user_location: Coord<f64>,
    /// Travel plus visit minutes across all stops.
    pub total_duration_minutes: f64,
    /// Stops in visiting order.
    pub stops: Vec<Candidate>,
    /// Estimated time to get back, in minutes.
    ///
    /// The greedy planner reports the sum of each stop's one-way travel time
    /// rather than the length of a real return leg.
    pub return_travel_minutes: f64,
}
