//! Nearest-neighbour visiting order.

use geo::Coord;
use journeo_core::{Candidate, haversine_km};

/// Order `selected` by repeatedly visiting the closest remaining stop.
///
/// Starting from `start`, the closest stop in the pool is removed and
/// appended to the route, and the walk continues from that stop's
/// coordinate until the pool is empty. When several stops are equally
/// close, the one earliest in the pool wins. The result is always a
/// permutation of the input.
///
/// The heuristic makes no attempt to find the shortest overall path.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use journeo_core::Candidate;
/// use journeo_core::test_support::poi_north_of;
/// use journeo_planner::order_nearest_neighbour;
///
/// let start = Coord { x: 78.1198, y: 9.9252 };
/// let far = Candidate::new(poi_north_of(1, "Far", "park", start, 4.0, 20), 4.0, 40.0);
/// let near = Candidate::new(poi_north_of(0, "Near", "park", start, 2.0, 30), 2.0, 40.0);
///
/// let route = order_nearest_neighbour(vec![far, near], start);
/// let names: Vec<_> = route.iter().map(|c| c.poi.name.as_str()).collect();
/// assert_eq!(names, ["Near", "Far"]);
/// ```
#[must_use]
pub fn order_nearest_neighbour(selected: Vec<Candidate>, start: Coord<f64>) -> Vec<Candidate> {
    let mut pool = selected;
    let mut route = Vec::with_capacity(pool.len());
    let mut current = start;

    while let Some(index) = nearest_index(&pool, current) {
        let stop = pool.remove(index);
        current = stop.poi.location;
        route.push(stop);
    }
    route
}

/// Index of the pool member closest to `from`, favouring the earliest on ties.
fn nearest_index(pool: &[Candidate], from: Coord<f64>) -> Option<usize> {
    pool.iter()
        .map(|candidate| haversine_km(from, candidate.poi.location))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
}
