//! Prompt rendering for the model planner.

use journeo_core::TripRequest;

/// Fewest stops to ask for: three for an hour or less, six beyond that.
///
/// # Examples
/// ```rust
/// use journeo_data::model::minimum_stops;
///
/// assert_eq!(minimum_stops(60), 3);
/// assert_eq!(minimum_stops(61), 6);
/// ```
#[must_use]
pub const fn minimum_stops(available_time_minutes: u32) -> u32 {
    if available_time_minutes <= 60 { 3 } else { 6 }
}

/// Render the planning prompt for `request`, starting from `start_label`.
///
/// The prompt states the constraints, names the visitor's coordinates and
/// interests, and spells out the JSON shape the reply must take.
#[must_use]
pub fn build_prompt(request: &TripRequest, start_label: &str) -> String {
    let minutes = request.available_time_minutes;
    let interests = if request.interests.is_empty() {
        "any".to_owned()
    } else {
        request
            .interests
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let min_stops = minimum_stops(minutes);
    let range_km = request.distance_range_km;
    let latitude = request.user_location.y;
    let longitude = request.user_location.x;

    format!(
        r#"You are a travel planner. Produce a trip plan as strict JSON and nothing else.

Rules:
- Include at least {min_stops} stops.
- Every stop must lie within {range_km} km of the start location.
- The start location is "{start_label}" at latitude {latitude}, longitude {longitude}.
- Prefer places matching these interests: {interests}.
- Every stop needs a latitude, a longitude and a full address.
- The whole trip must fit within {minutes} minutes.

Output format:
{{
  "trip_plan": {{
    "start_location": "{start_label}",
    "total_duration": "{minutes} minutes",
    "stops": [
      {{
        "name": "PLACE_NAME",
        "interest": "CATEGORY",
        "distance": "DISTANCE km",
        "travel_time": "TIME min",
        "visit_duration": "TIME min",
        "latitude": "LATITUDE",
        "longitude": "LONGITUDE",
        "address": "FULL_ADDRESS",
        "description": "SHORT_DESCRIPTION",
        "activities": ["ACTIVITY_1", "ACTIVITY_2"]
      }}
    ],
    "return": {{
      "destination": "{start_label}",
      "travel_time": "TIME min"
    }}
  }}
}}
"#
    )
}
