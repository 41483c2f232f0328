//! Points of interest annotated for a single request.

use crate::{PointOfInterest, travel_time_minutes};

/// A catalog record enriched with its distance from the visitor.
///
/// Candidates are created per request and dropped once the response is
/// produced.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use journeo_core::{Candidate, DEFAULT_TRAVEL_SPEED_KMH, PointOfInterest};
///
/// let poi = PointOfInterest::new(1, "Eco Park", "park", Coord { x: 0.0, y: 0.0 })
///     .with_visit_duration(20);
/// let candidate = Candidate::new(poi, 4.0, DEFAULT_TRAVEL_SPEED_KMH);
///
/// assert_eq!(candidate.travel_time_minutes, 6.0);
/// assert_eq!(candidate.cost_minutes(), 26.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The underlying catalog record.
    pub poi: PointOfInterest,
    /// Great-circle distance from the visitor, in kilometres.
    pub distance_km: f64,
    /// Estimated one-way travel time from the visitor, in minutes.
    pub travel_time_minutes: f64,
}

impl Candidate {
    /// Annotate `poi` with its distance and the travel time at `speed_kmh`.
    #[must_use]
    pub fn new(poi: PointOfInterest, distance_km: f64, speed_kmh: f64) -> Self {
        Self {
            poi,
            distance_km,
            travel_time_minutes: travel_time_minutes(distance_km, speed_kmh),
        }
    }

    /// Minutes this stop consumes from the budget: travel plus visit.
    #[must_use]
    pub fn cost_minutes(&self) -> f64 {
        self.travel_time_minutes + f64::from(self.poi.visit_duration_minutes)
    }
}
