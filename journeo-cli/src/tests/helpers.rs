//! Test helpers for writing catalogs and requests, plus stub planners.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use journeo_core::test_support::poi_north_of;
use journeo_core::{PlanError, PointOfInterest, TripPlan, TripPlanner, TripRequest};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::CliError;
use crate::planner::{PlannerBuilder, PlannerSettings};

/// Visitor position used throughout the CLI tests (central Madurai).
pub(super) const ORIGIN: Coord<f64> = Coord {
    x: 78.1198,
    y: 9.9252,
};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory with UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write a JSON catalog with a temple 2 km and a park 4 km north of
    /// [`ORIGIN`], returning its path.
    pub(super) fn write_catalog(&self) -> Utf8PathBuf {
        let rows: Vec<Value> = [
            poi_north_of(1, "Meenakshi Amman Temple", "temple", ORIGIN, 2.0, 30),
            poi_north_of(2, "Eco Park", "park", ORIGIN, 4.0, 20),
        ]
        .iter()
        .map(catalog_row)
        .collect();
        let path = self.path("places.json");
        write_utf8(&path, Value::Array(rows).to_string().as_bytes());
        path
    }

    /// Write a request body and return its path.
    pub(super) fn write_request(&self, body: &Value) -> Utf8PathBuf {
        let path = self.path("request.json");
        write_utf8(&path, body.to_string().as_bytes());
        path
    }
}

fn catalog_row(poi: &PointOfInterest) -> Value {
    json!({
        "place_name": poi.name,
        "Type": poi.category,
        "Latitude": poi.location.y,
        "Longitude": poi.location.x,
        "visit_duration": poi.visit_duration_minutes,
    })
}

/// Check a rendered `"<minutes> minutes"` total against `expected`.
///
/// The number must be written the way `f64` debug output writes it, so a
/// whole total reads `59.0` rather than `59.00`.
pub(super) fn assert_total_minutes(rendered: &str, expected: f64) {
    let number = rendered
        .strip_suffix(" minutes")
        .unwrap_or_else(|| panic!("missing minutes suffix: {rendered}"));
    let minutes: f64 = number.parse().expect("numeric total");
    assert!((minutes - expected).abs() < 1e-6, "total was {rendered}");
    assert_eq!(format!("{minutes:?}"), number);
}

/// A request body for a one-hour temple and park trip from [`ORIGIN`].
pub(super) fn hour_long_request() -> Value {
    json!({
        "location": "Periyar Bus Stand",
        "latitude": ORIGIN.y,
        "longitude": ORIGIN.x,
        "interests": ["temple", "park"],
        "availableTime": 60,
        "distanceRange": 5,
    })
}

/// Planner that always returns the same outcome.
pub(super) struct StubPlanner {
    outcome: Result<TripPlan, PlanError>,
}

impl StubPlanner {
    pub(super) const fn failing(error: PlanError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl TripPlanner for StubPlanner {
    fn plan(&self, _request: &TripRequest) -> Result<TripPlan, PlanError> {
        self.outcome.clone()
    }
}

/// Builder handing out a fixed planner and recording the settings it saw.
pub(super) struct StubPlannerBuilder {
    planner: Arc<dyn TripPlanner>,
    seen: std::sync::Mutex<Vec<PlannerSettings>>,
}

impl StubPlannerBuilder {
    pub(super) fn new(planner: Arc<dyn TripPlanner>) -> Self {
        Self {
            planner,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(super) fn seen(&self) -> Vec<PlannerSettings> {
        self.seen.lock().expect("settings lock").clone()
    }
}

impl PlannerBuilder for StubPlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Arc<dyn TripPlanner>, CliError> {
        self.seen
            .lock()
            .expect("settings lock")
            .push(settings.clone());
        Ok(Arc::clone(&self.planner))
    }
}
