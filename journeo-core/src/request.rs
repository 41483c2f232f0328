//! Trip requests and their validation.

use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

/// Search radius applied when the visitor does not supply one.
pub const DEFAULT_DISTANCE_RANGE_KM: f64 = 5.0;

/// Parameters for a trip-generation request.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use journeo_core::TripRequest;
///
/// let request = TripRequest::new(Coord { x: 78.1198, y: 9.9252 }, ["temple", "park"], 120)
///     .with_start_location("Villapuram, Madurai")
///     .with_distance_range(8.0);
///
/// assert!(request.validate().is_ok());
/// assert!(request.interests.contains("park"));
/// assert_eq!(request.distance_range_km, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Free-form label for the starting point, passed through unchanged.
    pub start_location: Option<String>,
    /// Visitor position (`x = longitude`, `y = latitude`).
    pub user_location: Coord<f64>,
    /// Categories the visitor wants to see, matched case-sensitively.
    pub interests: BTreeSet<String>,
    /// Time budget in minutes.
    pub available_time_minutes: u32,
    /// Maximum distance from the visitor to any stop, in kilometres.
    pub distance_range_km: f64,
}

impl TripRequest {
    /// Build a request with the default distance range and no start label.
    pub fn new<I, S>(user_location: Coord<f64>, interests: I, available_time_minutes: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_location: None,
            user_location,
            interests: interests.into_iter().map(Into::into).collect(),
            available_time_minutes,
            distance_range_km: DEFAULT_DISTANCE_RANGE_KM,
        }
    }

    /// Set the start location label.
    #[must_use]
    pub fn with_start_location(mut self, label: impl Into<String>) -> Self {
        self.start_location = Some(label.into());
        self
    }

    /// Set the maximum distance to any stop.
    #[must_use]
    pub fn with_distance_range(mut self, km: f64) -> Self {
        self.distance_range_km = km;
        self
    }

    /// Check the request before it reaches the planning pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`TripRequestValidationError`] when the user coordinate is
    /// outside WGS84 bounds or the distance range is negative or not finite.
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        let Coord {
            x: longitude,
            y: latitude,
        } = self.user_location;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TripRequestValidationError::LatitudeOutOfRange { latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TripRequestValidationError::LongitudeOutOfRange { longitude });
        }
        if !self.distance_range_km.is_finite() || self.distance_range_km < 0.0 {
            return Err(TripRequestValidationError::InvalidDistanceRange {
                distance_range_km: self.distance_range_km,
            });
        }
        Ok(())
    }
}

/// Errors raised while decoding or validating a [`TripRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripRequestValidationError {
    /// A required field was absent from the payload.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// A numeric field held something that is not a number.
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber {
        /// Wire name of the offending field.
        field: &'static str,
        /// The raw value received.
        value: String,
    },
    /// The time budget was negative, fractional text, or too large.
    #[error("available time must be a non-negative whole number of minutes, got {value:?}")]
    InvalidAvailableTime {
        /// The raw value received.
        value: String,
    },
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude.
        latitude: f64,
    },
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude.
        longitude: f64,
    },
    /// The search radius was negative or not finite.
    #[error("distance range {distance_range_km} km must be a non-negative finite number")]
    InvalidDistanceRange {
        /// The rejected radius.
        distance_range_km: f64,
    },
}
