//! Interest and distance filtering.

use std::collections::BTreeSet;

use geo::Coord;
use journeo_core::{Candidate, PoiCatalog, haversine_km};

/// Keep catalog records the visitor asked for and can reach.
///
/// A record qualifies when its category is in `interests` (exact,
/// case-sensitive equality) and its haversine distance from
/// `user_location` is at most `max_distance_km`. Qualifying records are
/// returned in catalog order, annotated with their distance and the travel
/// time at `speed_kmh`.
///
/// # Examples
/// ```rust
/// use std::collections::BTreeSet;
/// use geo::Coord;
/// use journeo_core::MemoryCatalog;
/// use journeo_core::test_support::poi_north_of;
/// use journeo_planner::filter_candidates;
///
/// let start = Coord { x: 78.1198, y: 9.9252 };
/// let catalog = MemoryCatalog::with_pois([
///     poi_north_of(0, "Temple", "temple", start, 2.0, 30),
///     poi_north_of(1, "Far Temple", "temple", start, 9.0, 30),
///     poi_north_of(2, "Mall", "shopping", start, 1.0, 30),
/// ]);
/// let interests = BTreeSet::from(["temple".to_owned()]);
///
/// let candidates = filter_candidates(&catalog, start, &interests, 5.0, 40.0);
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(candidates[0].poi.name, "Temple");
/// ```
#[must_use]
pub fn filter_candidates<C>(
    catalog: &C,
    user_location: Coord<f64>,
    interests: &BTreeSet<String>,
    max_distance_km: f64,
    speed_kmh: f64,
) -> Vec<Candidate>
where
    C: PoiCatalog + ?Sized,
{
    let candidates: Vec<Candidate> = catalog
        .pois()
        .filter(|poi| interests.contains(&poi.category))
        .filter_map(|poi| {
            let distance_km = haversine_km(user_location, poi.location);
            (distance_km <= max_distance_km)
                .then(|| Candidate::new(poi.clone(), distance_km, speed_kmh))
        })
        .collect();
    log::debug!(
        "{} candidates within {max_distance_km} km match {} interests",
        candidates.len(),
        interests.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use journeo_core::test_support::{poi, poi_north_of};
    use journeo_core::{DEFAULT_TRAVEL_SPEED_KMH, MemoryCatalog};
    use rstest::{fixture, rstest};

    const START: Coord<f64> = Coord {
        x: 78.1198,
        y: 9.9252,
    };

    fn interests(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|label| (*label).to_owned()).collect()
    }

    #[fixture]
    fn catalog() -> MemoryCatalog {
        MemoryCatalog::with_pois([
            poi_north_of(0, "Meenakshi Amman Temple", "temple", START, 2.0, 30),
            poi_north_of(1, "Eco Park", "park", START, 4.0, 20),
            poi_north_of(2, "Alagar Kovil", "temple", START, 20.0, 60),
            poi_north_of(3, "Vishaal de Mall", "shopping", START, 0.5, 45),
        ])
    }

    #[rstest]
    fn keeps_requested_categories_within_range(catalog: MemoryCatalog) {
        let found = filter_candidates(
            &catalog,
            START,
            &interests(&["temple", "park"]),
            5.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        let ids: Vec<u64> = found.iter().map(|c| c.poi.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[rstest]
    fn annotates_distance_and_travel_time(catalog: MemoryCatalog) {
        let found = filter_candidates(
            &catalog,
            START,
            &interests(&["park"]),
            5.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        let park = found.first().expect("park should qualify");
        assert!((park.distance_km - 4.0).abs() < 1e-9);
        assert!((park.travel_time_minutes - 6.0).abs() < 1e-9);
    }

    #[rstest]
    fn narrow_range_excludes_matching_category(catalog: MemoryCatalog) {
        let found = filter_candidates(
            &catalog,
            START,
            &interests(&["temple"]),
            1.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        assert!(found.is_empty());
    }

    #[rstest]
    #[case("Temple")]
    #[case("temple ")]
    #[case("temples")]
    fn category_match_is_exact(catalog: MemoryCatalog, #[case] label: &str) {
        let found = filter_candidates(
            &catalog,
            START,
            &interests(&[label]),
            50.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        assert!(found.is_empty());
    }

    #[rstest]
    fn boundary_distance_is_included() {
        let catalog = MemoryCatalog::with_poi(poi(9, "Here", "park", START.y, START.x));
        let found = filter_candidates(
            &catalog,
            START,
            &interests(&["park"]),
            0.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    fn empty_interest_set_yields_nothing(catalog: MemoryCatalog) {
        let found = filter_candidates(
            &catalog,
            START,
            &BTreeSet::new(),
            50.0,
            DEFAULT_TRAVEL_SPEED_KMH,
        );
        assert!(found.is_empty());
    }
}
