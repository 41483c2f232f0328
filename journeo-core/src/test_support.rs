//! Test-only helpers for building catalogs with known geometry.
//!
//! Available to unit tests and, behind the `test-support` feature, to the
//! behaviour and property tests of downstream crates.

use geo::Coord;

use crate::{EARTH_RADIUS_KM, PointOfInterest};

/// Construct a `PointOfInterest` at `(latitude, longitude)` with defaults.
///
/// # Examples
/// ```rust
/// use journeo_core::test_support::poi;
///
/// let temple = poi(1, "Meenakshi Amman Temple", "temple", 9.9195, 78.1193);
/// assert_eq!(temple.location.y, 9.9195);
/// assert_eq!(temple.visit_duration_minutes, 30);
/// ```
#[must_use]
pub fn poi(id: u64, name: &str, category: &str, latitude: f64, longitude: f64) -> PointOfInterest {
    PointOfInterest::new(
        id,
        name,
        category,
        Coord {
            x: longitude,
            y: latitude,
        },
    )
}

/// Return the coordinate `km` kilometres due north of `origin`.
///
/// Moving along a meridian changes only the latitude, so the haversine
/// distance back to `origin` equals `km` up to rounding.
#[must_use]
pub fn offset_north(origin: Coord<f64>, km: f64) -> Coord<f64> {
    Coord {
        x: origin.x,
        y: origin.y + (km / EARTH_RADIUS_KM).to_degrees(),
    }
}

/// Construct a `PointOfInterest` `km` kilometres north of `origin`.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use journeo_core::haversine_km;
/// use journeo_core::test_support::poi_north_of;
///
/// let origin = Coord { x: 78.1198, y: 9.9252 };
/// let park = poi_north_of(2, "Eco Park", "park", origin, 4.0, 20);
/// assert!((haversine_km(origin, park.location) - 4.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn poi_north_of(
    id: u64,
    name: &str,
    category: &str,
    origin: Coord<f64>,
    km: f64,
    visit_duration_minutes: u32,
) -> PointOfInterest {
    PointOfInterest::new(id, name, category, offset_north(origin, km))
        .with_visit_duration(visit_duration_minutes)
}
