//! Greedy budget selection.

use journeo_core::Candidate;

/// Candidates chosen to fit a time budget, with the minutes they consume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Chosen candidates, nearest first.
    pub stops: Vec<Candidate>,
    /// Sum of outbound travel and visit minutes across `stops`.
    pub total_minutes: f64,
}

impl Selection {
    /// Return `true` when nothing fit the budget.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Choose candidates nearest-first while their cost fits the budget.
///
/// Candidates are ordered by ascending distance from the visitor using a
/// stable sort, so equally distant candidates keep their incoming order.
/// Each candidate costs its travel time plus its visit duration. A
/// candidate is kept when the running total plus its cost does not exceed
/// `available_time_minutes`; otherwise it is skipped and the walk carries
/// on, allowing a cheaper, farther candidate to still fit.
///
/// The return leg is not charged against the budget.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use journeo_core::Candidate;
/// use journeo_core::test_support::poi_north_of;
/// use journeo_planner::select_within_budget;
///
/// let start = Coord { x: 78.1198, y: 9.9252 };
/// let near = poi_north_of(0, "Near", "park", start, 2.0, 30);
/// let far = poi_north_of(1, "Far", "park", start, 4.0, 20);
/// let candidates = vec![
///     Candidate::new(far, 4.0, 40.0),
///     Candidate::new(near, 2.0, 40.0),
/// ];
///
/// let selection = select_within_budget(candidates, 40);
/// assert_eq!(selection.stops.len(), 1);
/// assert_eq!(selection.stops[0].poi.name, "Near");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "budget accounting sums fractional travel minutes"
)]
pub fn select_within_budget(mut candidates: Vec<Candidate>, available_time_minutes: u32) -> Selection {
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    let budget = f64::from(available_time_minutes);

    let mut selection = Selection::default();
    for candidate in candidates {
        let cost = candidate.cost_minutes();
        if selection.total_minutes + cost <= budget {
            selection.total_minutes += cost;
            selection.stops.push(candidate);
        } else {
            log::trace!(
                "skipping {} ({cost:.1} min) with {:.1} of {budget} min used",
                candidate.poi.name,
                selection.total_minutes
            );
        }
    }
    log::debug!(
        "selected {} stops using {:.1} of {budget} minutes",
        selection.stops.len(),
        selection.total_minutes
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use journeo_core::DEFAULT_TRAVEL_SPEED_KMH;
    use journeo_core::test_support::poi_north_of;
    use rstest::rstest;

    const START: Coord<f64> = Coord {
        x: 78.1198,
        y: 9.9252,
    };

    fn candidate(id: u64, km: f64, visit: u32) -> Candidate {
        let poi = poi_north_of(id, &format!("Stop {id}"), "park", START, km, visit);
        Candidate::new(poi, km, DEFAULT_TRAVEL_SPEED_KMH)
    }

    fn ids(selection: &Selection) -> Vec<u64> {
        selection.stops.iter().map(|c| c.poi.id).collect()
    }

    #[rstest]
    fn sorts_nearest_first_before_selecting() {
        let selection = select_within_budget(
            vec![candidate(1, 4.0, 20), candidate(0, 2.0, 30)],
            60,
        );
        assert_eq!(ids(&selection), vec![0, 1]);
        assert!((selection.total_minutes - 59.0).abs() < 1e-9);
    }

    #[rstest]
    fn skips_expensive_candidate_and_keeps_walking() {
        // 2 km/60 min costs 63, 3 km/5 min costs 9.5.
        let selection = select_within_budget(
            vec![candidate(0, 2.0, 60), candidate(1, 3.0, 5)],
            30,
        );
        assert_eq!(ids(&selection), vec![1]);
        assert!((selection.total_minutes - 9.5).abs() < 1e-9);
    }

    #[rstest]
    fn exact_fit_is_accepted() {
        let selection = select_within_budget(vec![candidate(0, 2.0, 27)], 30);
        assert_eq!(ids(&selection), vec![0]);
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    fn nothing_fits_tiny_budget(#[case] budget: u32) {
        let selection = select_within_budget(vec![candidate(0, 2.0, 30)], budget);
        assert!(selection.is_empty());
        assert!(selection.total_minutes.abs() < f64::EPSILON);
    }

    #[rstest]
    fn equal_distances_keep_incoming_order() {
        let selection = select_within_budget(
            vec![candidate(7, 1.0, 5), candidate(3, 1.0, 5), candidate(5, 1.0, 5)],
            120,
        );
        assert_eq!(ids(&selection), vec![7, 3, 5]);
    }

    #[rstest]
    fn empty_input_selects_nothing() {
        let selection = select_within_budget(Vec::new(), 240);
        assert_eq!(selection, Selection::default());
    }
}
