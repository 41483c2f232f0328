//! Great-circle distance and travel-time estimates.
//!
//! Coordinates are WGS84 `geo::Coord` values with `x = longitude` and
//! `y = latitude`, both in degrees. Callers must keep latitude within
//! `[-90, 90]` and longitude within `[-180, 180]`; the functions here accept
//! any finite input but only give meaningful answers inside those ranges.
//! [`TripRequest::validate`](crate::TripRequest::validate) enforces the
//! ranges for user-supplied locations.

use geo::Coord;

/// Mean Earth radius used by [`haversine_km`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average travel speed assumed between the visitor and a stop.
pub const DEFAULT_TRAVEL_SPEED_KMH: f64 = 40.0;

/// Return the haversine distance between two coordinates in kilometres.
///
/// The result is symmetric and zero for identical coordinates. At city scale
/// the spherical approximation error is negligible.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use journeo_core::haversine_km;
///
/// let temple = Coord { x: 78.1198, y: 9.9195 };
/// assert_eq!(haversine_km(temple, temple), 0.0);
///
/// let palace = Coord { x: 78.1232, y: 9.9149 };
/// let there = haversine_km(temple, palace);
/// assert!((there - haversine_km(palace, temple)).abs() < 1e-12);
/// assert!(there > 0.5 && there < 0.7);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let half_dlat = (lat_to - lat_from) / 2.0;
    let half_dlon = (to.x.to_radians() - from.x.to_radians()) / 2.0;

    // Rounding can push `h` a hair past 1.0 for antipodal points.
    let h = (half_dlat.sin().powi(2) + lat_from.cos() * lat_to.cos() * half_dlon.sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Convert a distance into travel minutes at `speed_kmh`.
///
/// # Examples
/// ```
/// use journeo_core::{DEFAULT_TRAVEL_SPEED_KMH, travel_time_minutes};
///
/// assert_eq!(travel_time_minutes(2.0, DEFAULT_TRAVEL_SPEED_KMH), 3.0);
/// ```
#[must_use]
pub fn travel_time_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / speed_kmh * 60.0
}
