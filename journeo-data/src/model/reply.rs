//! Decoding model replies into trip plans.
//!
//! Chat models wrap their JSON in prose, put units inside numbers and drop
//! fields at will. Decoding is therefore lenient about shape and strict about
//! the one thing a stop cannot do without: its coordinates.

use geo::Coord;
use journeo_core::{
    Candidate, DEFAULT_TRAVEL_SPEED_KMH, PlanError, PointOfInterest, TripPlan, TripRequest,
    haversine_km, travel_time_minutes,
};
use serde::Deserialize;

/// Return the text from the first `{` to the last `}` inclusive.
///
/// # Examples
/// ```rust
/// use journeo_data::model::extract_json_object;
///
/// let reply = "Here is your plan:\n{\"trip_plan\": {}}\nEnjoy!";
/// assert_eq!(extract_json_object(reply), Some("{\"trip_plan\": {}}"));
/// assert_eq!(extract_json_object("no plan today"), None);
/// ```
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    text.get(start..=end)
}

/// Decode a model reply into a [`TripPlan`] for `request`.
///
/// Missing distances are measured from the visitor, missing travel times
/// derived from the distance, and missing totals summed from the stops.
/// Negative or non-finite distances, times and totals count as missing.
///
/// # Errors
///
/// Returns [`PlanError::MalformedModelOutput`] when the reply holds no JSON
/// object, the object does not follow the `trip_plan` shape, or a stop lacks
/// usable coordinates.
pub fn parse_reply(text: &str, request: &TripRequest) -> Result<TripPlan, PlanError> {
    let json = extract_json_object(text).ok_or_else(|| malformed("reply holds no JSON object"))?;
    let reply: ModelReply = serde_json::from_str(json)
        .map_err(|err| malformed(&format!("reply does not follow the plan format: {err}")))?;
    let plan = reply.trip_plan;

    let stops = plan
        .stops
        .into_iter()
        .zip(1_u64..)
        .map(|(stop, number)| stop.into_candidate(number, request.user_location))
        .collect::<Result<Vec<_>, _>>()?;

    let total_duration_minutes = plan
        .total_duration
        .as_ref()
        .and_then(Lenient::as_non_negative)
        .unwrap_or_else(|| stops.iter().map(Candidate::cost_minutes).sum());
    let return_travel_minutes = plan
        .return_leg
        .as_ref()
        .and_then(|leg| leg.travel_time.as_ref())
        .and_then(Lenient::as_non_negative)
        .unwrap_or_else(|| stops.iter().map(|stop| stop.travel_time_minutes).sum());

    Ok(TripPlan {
        start_location: request.start_location.clone().or(plan.start_location),
        user_location: request.user_location,
        total_duration_minutes,
        stops,
        return_travel_minutes,
    })
}

fn malformed(reason: &str) -> PlanError {
    PlanError::MalformedModelOutput {
        reason: reason.to_owned(),
    }
}

#[derive(Debug, Deserialize)]
struct ModelReply {
    trip_plan: ModelPlan,
}

#[derive(Debug, Deserialize)]
struct ModelPlan {
    #[serde(default)]
    start_location: Option<String>,
    #[serde(default)]
    total_duration: Option<Lenient>,
    #[serde(default)]
    stops: Vec<ModelStop>,
    #[serde(default, rename = "return")]
    return_leg: Option<ModelReturn>,
}

#[derive(Debug, Deserialize)]
struct ModelReturn {
    #[serde(default)]
    travel_time: Option<Lenient>,
}

#[derive(Debug, Deserialize)]
struct ModelStop {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "type", alias = "category")]
    interest: Option<String>,
    #[serde(default)]
    distance: Option<Lenient>,
    #[serde(default)]
    travel_time: Option<Lenient>,
    #[serde(default)]
    visit_duration: Option<Lenient>,
    #[serde(default)]
    latitude: Option<Lenient>,
    #[serde(default)]
    longitude: Option<Lenient>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    activities: Option<Activities>,
}

impl ModelStop {
    fn into_candidate(self, number: u64, origin: Coord<f64>) -> Result<Candidate, PlanError> {
        let latitude = self
            .latitude
            .as_ref()
            .and_then(Lenient::as_f64)
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .ok_or_else(|| malformed(&format!("stop {number} has no usable latitude")))?;
        let longitude = self
            .longitude
            .as_ref()
            .and_then(Lenient::as_f64)
            .filter(|lon| (-180.0..=180.0).contains(lon))
            .ok_or_else(|| malformed(&format!("stop {number} has no usable longitude")))?;
        let location = Coord {
            x: longitude,
            y: latitude,
        };

        let name = self.name.unwrap_or_else(|| format!("Stop {number}"));
        let mut poi = PointOfInterest::new(number, name, self.interest.unwrap_or_default(), location);
        if let Some(address) = self.address {
            poi = poi.with_address(address);
        }
        if let Some(description) = self.description {
            poi = poi.with_description(description);
        }
        if let Some(activities) = self.activities {
            poi.activities = activities.into_list();
        }
        if let Some(minutes) = self.visit_duration.as_ref().and_then(Lenient::as_minutes) {
            poi = poi.with_visit_duration(minutes);
        }

        let distance_km = self
            .distance
            .as_ref()
            .and_then(Lenient::as_non_negative)
            .unwrap_or_else(|| haversine_km(origin, location));
        let travel_time = self
            .travel_time
            .as_ref()
            .and_then(Lenient::as_non_negative)
            .unwrap_or_else(|| travel_time_minutes(distance_km, DEFAULT_TRAVEL_SPEED_KMH));

        Ok(Candidate {
            poi,
            distance_km,
            travel_time_minutes: travel_time,
        })
    }
}

/// A number that may arrive bare or as text with a unit suffix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    /// The leading number, ignoring any unit suffix such as `km` or `min`.
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => leading_number(text),
        };
        value.filter(|value| value.is_finite())
    }

    /// Like [`Lenient::as_f64`], treating negative values as absent.
    fn as_non_negative(&self) -> Option<f64> {
        self.as_f64().filter(|value| *value >= 0.0)
    }

    fn as_minutes(&self) -> Option<u32> {
        let rounded = self.as_f64()?.round();
        if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
            return None;
        }
        // In range and integral after the check above.
        Some(rounded as u32)
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(index, ch)| {
            !(ch.is_ascii_digit() || ch == '.' || (index == 0 && (ch == '-' || ch == '+')))
        })
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed.get(..end)?.parse().ok()
}

/// Activities as a JSON list or as one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Activities {
    List(Vec<String>),
    Text(String),
}

impl Activities {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Text(text) => journeo_core::split_activities(&text),
        }
    }
}
