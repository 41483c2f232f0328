//! Points of interest and the defaults applied to catalog records.

use geo::Coord;

/// Visit duration applied when a record does not provide one.
pub const DEFAULT_VISIT_DURATION_MINUTES: u32 = 30;

/// Address applied when a record does not provide one.
pub const UNKNOWN_ADDRESS: &str = "Unknown Address";

/// A place a visitor may stop at.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
/// Records are created once when the catalog loads and are never mutated
/// afterwards.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use journeo_core::PointOfInterest;
///
/// let poi = PointOfInterest::new(1, "Meenakshi Amman Temple", "temple", Coord { x: 78.1193, y: 9.9195 })
///     .with_visit_duration(90);
///
/// assert_eq!(poi.category, "temple");
/// assert_eq!(poi.address, "Unknown Address");
/// assert_eq!(poi.visit_duration_minutes, 90);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Row number within the catalog.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Category label matched verbatim against requested interests.
    pub category: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Street address.
    pub address: String,
    /// Free-form description; empty when unknown.
    pub description: String,
    /// Activities split from a comma-separated field, see [`split_activities`].
    pub activities: Vec<String>,
    /// Time spent at the stop, in minutes.
    pub visit_duration_minutes: u32,
}

impl PointOfInterest {
    /// Construct a record with default metadata.
    ///
    /// The address defaults to [`UNKNOWN_ADDRESS`], the description to an
    /// empty string, the activities to `[""]` (an empty field split on
    /// commas) and the visit duration to [`DEFAULT_VISIT_DURATION_MINUTES`].
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            location,
            address: UNKNOWN_ADDRESS.to_owned(),
            description: String::new(),
            activities: split_activities(""),
            visit_duration_minutes: DEFAULT_VISIT_DURATION_MINUTES,
        }
    }

    /// Replace the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Replace the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the activities with the pieces of a comma-separated field.
    #[must_use]
    pub fn with_activities(mut self, field: &str) -> Self {
        self.activities = split_activities(field);
        self
    }

    /// Replace the visit duration.
    #[must_use]
    pub fn with_visit_duration(mut self, minutes: u32) -> Self {
        self.visit_duration_minutes = minutes;
        self
    }

    /// Whether the record lists at least one real activity.
    ///
    /// An empty activities field splits into a single empty string; that
    /// shape, like any list of blank pieces, counts as "no activities".
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use journeo_core::PointOfInterest;
    ///
    /// let park = PointOfInterest::new(1, "Eco Park", "park", Coord { x: 0.0, y: 0.0 });
    /// assert_eq!(park.activities, vec![String::new()]);
    /// assert!(!park.has_activities());
    /// assert!(park.with_activities("Walking,Boating").has_activities());
    /// ```
    #[must_use]
    pub fn has_activities(&self) -> bool {
        self.activities
            .iter()
            .any(|activity| !activity.trim().is_empty())
    }
}

/// Split a comma-separated activities field.
///
/// Pieces are kept verbatim, including surrounding whitespace, and an empty
/// field yields a single empty string.
///
/// # Examples
/// ```
/// use journeo_core::split_activities;
///
/// assert_eq!(split_activities("Prayer, Photography"), vec!["Prayer", " Photography"]);
/// assert_eq!(split_activities(""), vec![""]);
/// ```
#[must_use]
pub fn split_activities(field: &str) -> Vec<String> {
    field.split(',').map(str::to_owned).collect()
}
