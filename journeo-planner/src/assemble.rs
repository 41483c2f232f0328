//! Packaging ordered stops into a trip plan.

use journeo_core::{Candidate, PlanError, TripPlan, TripRequest};

/// Build a [`TripPlan`] from the ordered stops and their total cost.
///
/// The start label and user coordinate are copied from `request`. The
/// return travel time is the sum of each stop's one-way travel time from
/// the visitor, which approximates rather than measures the way back.
///
/// # Errors
///
/// Returns [`PlanError::NoEligibleStops`] when `ordered_stops` is empty.
#[expect(
    clippy::float_arithmetic,
    reason = "return estimate sums fractional travel minutes"
)]
pub fn assemble_trip(
    request: &TripRequest,
    total_minutes: f64,
    ordered_stops: Vec<Candidate>,
) -> Result<TripPlan, PlanError> {
    if ordered_stops.is_empty() {
        return Err(PlanError::NoEligibleStops);
    }
    let return_travel_minutes = ordered_stops
        .iter()
        .map(|stop| stop.travel_time_minutes)
        .sum();
    Ok(TripPlan {
        start_location: request.start_location.clone(),
        user_location: request.user_location,
        total_duration_minutes: total_minutes,
        stops: ordered_stops,
        return_travel_minutes,
    })
}
