//! JSON payloads exchanged with trip-planning clients.
//!
//! Requests arrive as `{location, latitude, longitude, interests,
//! availableTime, distanceRange}`; plans leave wrapped in a `trip_plan`
//! envelope with human-readable duration strings. Numeric request fields
//! accept either JSON numbers or numeric strings.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{
    Candidate, DEFAULT_DISTANCE_RANGE_KM, TripPlan, TripRequest, TripRequestValidationError,
};

const FIELD_LATITUDE: &str = "latitude";
const FIELD_LONGITUDE: &str = "longitude";
const FIELD_AVAILABLE_TIME: &str = "availableTime";
const FIELD_DISTANCE_RANGE: &str = "distanceRange";

/// A number that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number.
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self, field: &'static str) -> Result<f64, TripRequestValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| TripRequestValidationError::InvalidNumber {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }

    /// Whole minutes: numbers truncate toward zero, text must be an integer.
    fn as_minutes(&self) -> Result<u32, TripRequestValidationError> {
        let invalid = || TripRequestValidationError::InvalidAvailableTime {
            value: self.to_string(),
        };
        match self {
            Self::Number(value) => {
                let whole = value.trunc();
                if whole.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&whole) {
                    // Integral and within u32 after the check above.
                    Ok(whole as u32)
                } else {
                    Err(invalid())
                }
            }
            Self::Text(text) => text.trim().parse().map_err(|_| invalid()),
        }
    }
}

impl std::fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Request body of the trip-generation endpoint.
///
/// # Examples
/// ```rust
/// use journeo_core::TripRequest;
/// use journeo_core::wire::TripRequestDto;
///
/// let body = r#"{
///     "location": "Villapuram, Madurai",
///     "latitude": 9.9252,
///     "longitude": "78.1198",
///     "interests": ["temple", "park"],
///     "availableTime": 90
/// }"#;
/// let dto: TripRequestDto = serde_json::from_str(body)?;
/// let request = TripRequest::try_from(dto)?;
///
/// assert_eq!(request.available_time_minutes, 90);
/// assert_eq!(request.distance_range_km, 5.0);
/// assert_eq!(request.user_location.x, 78.1198);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestDto {
    /// Start label shown back to the visitor.
    #[serde(default)]
    pub location: Option<String>,
    /// Visitor latitude in degrees.
    #[serde(default)]
    pub latitude: Option<NumberOrText>,
    /// Visitor longitude in degrees.
    #[serde(default)]
    pub longitude: Option<NumberOrText>,
    /// Requested categories.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Time budget in minutes; zero when absent.
    #[serde(default)]
    pub available_time: Option<NumberOrText>,
    /// Search radius in kilometres; 5 when absent.
    #[serde(default)]
    pub distance_range: Option<NumberOrText>,
}

impl TryFrom<TripRequestDto> for TripRequest {
    type Error = TripRequestValidationError;

    fn try_from(dto: TripRequestDto) -> Result<Self, Self::Error> {
        let latitude = dto
            .latitude
            .as_ref()
            .ok_or(TripRequestValidationError::MissingField {
                field: FIELD_LATITUDE,
            })?
            .as_f64(FIELD_LATITUDE)?;
        let longitude = dto
            .longitude
            .as_ref()
            .ok_or(TripRequestValidationError::MissingField {
                field: FIELD_LONGITUDE,
            })?
            .as_f64(FIELD_LONGITUDE)?;
        let available_time_minutes = dto
            .available_time
            .as_ref()
            .map_or(Ok(0), NumberOrText::as_minutes)?;
        let distance_range_km = dto
            .distance_range
            .as_ref()
            .map_or(Ok(DEFAULT_DISTANCE_RANGE_KM), |range| {
                range.as_f64(FIELD_DISTANCE_RANGE)
            })?;

        let request = Self {
            start_location: dto.location,
            user_location: Coord {
                x: longitude,
                y: latitude,
            },
            interests: dto.interests.into_iter().collect(),
            available_time_minutes,
            distance_range_km,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Top-level response body: `{"trip_plan": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlanEnvelope {
    /// The itinerary.
    pub trip_plan: TripPlanDto,
}

/// Serialised form of a [`TripPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlanDto {
    /// Start label copied from the request.
    pub start_location: Option<String>,
    /// Visitor latitude.
    pub user_latitude: f64,
    /// Visitor longitude.
    pub user_longitude: f64,
    /// Total minutes rendered as `"<minutes> minutes"`, e.g. `"59.0 minutes"`.
    pub total_duration: String,
    /// Stops in visiting order.
    pub stops: Vec<StopDto>,
    /// Return leg summary.
    #[serde(rename = "return")]
    pub return_leg: ReturnLegDto,
}

/// Serialised form of one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDto {
    /// Place name.
    pub name: String,
    /// Distance from the visitor in kilometres.
    pub distance: f64,
    /// Stop latitude.
    pub latitude: f64,
    /// Stop longitude.
    pub longitude: f64,
    /// Street address.
    pub address: String,
    /// Description.
    pub description: String,
    /// Activities split from the catalog field.
    pub activities: Vec<String>,
    /// One-way travel minutes from the visitor.
    pub travel_time: f64,
    /// Minutes spent at the stop.
    pub visit_duration: u32,
    /// Category that matched the request.
    pub interest: String,
}

/// Serialised return leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnLegDto {
    /// Whole minutes rendered as `"<minutes> min"`.
    pub travel_time: String,
}

/// Body returned alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&Candidate> for StopDto {
    fn from(stop: &Candidate) -> Self {
        let poi = &stop.poi;
        Self {
            name: poi.name.clone(),
            distance: stop.distance_km,
            latitude: poi.location.y,
            longitude: poi.location.x,
            address: poi.address.clone(),
            description: poi.description.clone(),
            activities: poi.activities.clone(),
            travel_time: stop.travel_time_minutes,
            visit_duration: poi.visit_duration_minutes,
            interest: poi.category.clone(),
        }
    }
}

/// Render total minutes as the shortest decimal that reads back to the same
/// value, keeping one fractional digit for whole numbers (`59.0`, `36.5`).
fn render_total_duration(minutes: f64) -> String {
    format!("{minutes:?} minutes")
}

impl From<&TripPlan> for TripPlanEnvelope {
    fn from(plan: &TripPlan) -> Self {
        Self {
            trip_plan: TripPlanDto {
                start_location: plan.start_location.clone(),
                user_latitude: plan.user_location.y,
                user_longitude: plan.user_location.x,
                total_duration: render_total_duration(plan.total_duration_minutes),
                stops: plan.stops.iter().map(StopDto::from).collect(),
                return_leg: ReturnLegDto {
                    travel_time: format!("{:.0} min", plan.return_travel_minutes),
                },
            },
        }
    }
}
