//! Tests for catalog loading.

use super::*;
use camino::Utf8PathBuf;
use journeo_core::{PoiCatalog, UNKNOWN_ADDRESS};
use rstest::{fixture, rstest};
use rusqlite::{Connection, params};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

const MADURAI_ROWS: &str = r#"[
    {
        "place_name": "Meenakshi Amman Temple",
        "Type": "temple",
        "Latitude": 9.9195,
        "Longitude": 78.1193,
        "Address": "Madurai Main, Madurai, Tamil Nadu 625001",
        "Description": "Historic Hindu temple on the south bank of the Vaigai.",
        "Activities": "Darshan,Architecture tour,Photography",
        "visit_duration": 90
    },
    {
        "place_name": "Eco Park",
        "Type": "park",
        "Latitude": 9.9300,
        "Longitude": 78.1400
    }
]"#;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("temp path should be UTF-8")
}

fn write_places_db(path: &Utf8Path, rows: &[(&str, &str, Option<f64>, Option<f64>, Option<i64>)]) {
    let connection = Connection::open(path).expect("create database");
    connection
        .execute_batch(
            "CREATE TABLE places (
                place_name TEXT, type TEXT, latitude REAL, longitude REAL,
                address TEXT, description TEXT, activities TEXT, visit_duration INTEGER
            );",
        )
        .expect("create table");
    for (name, category, latitude, longitude, visit) in rows {
        connection
            .execute(
                "INSERT INTO places (place_name, type, latitude, longitude, visit_duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, category, latitude, longitude, visit],
            )
            .expect("insert row");
    }
}

/// Write a workbook whose first sheet carries the Madurai headers.
fn write_places_workbook(path: &Utf8Path, rows: &[(&str, &str, f64, f64, Option<f64>)]) {
    let headers = ["place_name", "Type", "Latitude", "Longitude", "Activities", "visit_duration"];
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (column, header) in (0_u16..).zip(headers) {
        sheet.write_string(0, column, header).expect("write header");
    }
    for (row, (name, category, latitude, longitude, visit)) in (1_u32..).zip(rows) {
        sheet.write_string(row, 0, *name).expect("write name");
        sheet.write_string(row, 1, *category).expect("write type");
        sheet.write_number(row, 2, *latitude).expect("write latitude");
        sheet.write_number(row, 3, *longitude).expect("write longitude");
        sheet
            .write_string(row, 4, "Walking,Photography")
            .expect("write activities");
        if let Some(minutes) = visit {
            sheet.write_number(row, 5, *minutes).expect("write visit duration");
        }
    }
    workbook.save(path).expect("save workbook");
}

#[rstest]
fn json_rows_become_points_of_interest() {
    let catalog = parse_json_catalog(MADURAI_ROWS).expect("catalog should parse");
    let pois: Vec<_> = catalog.pois().collect();
    assert_eq!(pois.len(), 2);

    let temple = pois.first().expect("temple row");
    assert_eq!(temple.id, 1);
    assert_eq!(temple.category, "temple");
    assert_eq!(temple.visit_duration_minutes, 90);
    assert_eq!(
        temple.activities,
        vec!["Darshan", "Architecture tour", "Photography"]
    );
    assert!((temple.location.x - 78.1193).abs() < f64::EPSILON);
    assert!((temple.location.y - 9.9195).abs() < f64::EPSILON);
}

#[rstest]
fn absent_columns_take_defaults() {
    let catalog = parse_json_catalog(MADURAI_ROWS).expect("catalog should parse");
    let park = catalog.as_slice().get(1).expect("park row");

    assert_eq!(park.id, 2);
    assert_eq!(park.address, UNKNOWN_ADDRESS);
    assert_eq!(park.description, "");
    assert_eq!(park.visit_duration_minutes, 30);
    assert!(!park.has_activities());
}

#[rstest]
#[case(r#"[{"place_name": "A", "Type": "park", "Longitude": 78.1}]"#, 1)]
#[case(
    r#"[{"place_name": "A", "Type": "park", "Latitude": 9.9, "Longitude": 78.1},
        {"place_name": "B", "Type": "park", "Latitude": 95.0, "Longitude": 78.1}]"#,
    2
)]
#[case(r#"[{"Type": "park", "Latitude": 9.9, "Longitude": 78.1}]"#, 1)]
#[case(
    r#"[{"place_name": "A", "Type": "park", "Latitude": 9.9, "Longitude": 78.1, "visit_duration": -5}]"#,
    1
)]
fn invalid_rows_are_reported_by_number(#[case] text: &str, #[case] expected_row: u64) {
    let err = parse_json_catalog(text).expect_err("row should be rejected");
    match err {
        CatalogLoadError::InvalidRecord { row, .. } => assert_eq!(row, expected_row),
        other => panic!("expected invalid record, got {other:?}"),
    }
}

#[rstest]
fn fractional_visit_duration_is_rounded() {
    let catalog = parse_json_catalog(
        r#"[{"place_name": "A", "Type": "park", "Latitude": 9.9, "Longitude": 78.1, "visit_duration": 44.6}]"#,
    )
    .expect("catalog should parse");
    assert_eq!(catalog.as_slice().first().map(|p| p.visit_duration_minutes), Some(45));
}

#[rstest]
fn non_array_json_is_rejected() {
    let err = parse_json_catalog(r#"{"places": []}"#).expect_err("object should be rejected");
    assert!(matches!(err, CatalogLoadError::Json { .. }));
}

#[rstest]
fn load_catalog_reads_json_files(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "places.json");
    std::fs::write(&path, MADURAI_ROWS).expect("write catalog");

    let catalog = load_catalog(&path).expect("catalog should load");
    assert_eq!(catalog.len(), 2);
}

#[rstest]
fn load_catalog_reports_missing_files(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "missing.json");
    let err = load_catalog(&path).expect_err("missing file should fail");
    match err {
        CatalogLoadError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[rstest]
fn sqlite_rows_load_in_rowid_order(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "places.sqlite3");
    write_places_db(
        &path,
        &[
            ("Gandhi Museum", "museum", Some(9.9302), Some(78.1386), Some(60)),
            ("Thirumalai Nayakkar Mahal", "palace", Some(9.9149), Some(78.1240), None),
        ],
    );

    let catalog = load_catalog(&path).expect("catalog should load");
    let names: Vec<&str> = catalog.pois().map(|poi| poi.name.as_str()).collect();
    assert_eq!(names, ["Gandhi Museum", "Thirumalai Nayakkar Mahal"]);

    let palace = catalog.as_slice().get(1).expect("palace row");
    assert_eq!(palace.id, 2);
    assert_eq!(palace.visit_duration_minutes, 30);
}

#[rstest]
fn sqlite_rows_without_coordinates_are_rejected(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "places.db");
    write_places_db(&path, &[("Nowhere", "park", None, Some(78.1), None)]);

    let err = load_catalog(&path).expect_err("row should be rejected");
    assert!(matches!(err, CatalogLoadError::InvalidRecord { row: 1, .. }));
}

#[rstest]
fn sqlite_without_places_table_fails(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "empty.db");
    Connection::open(&path)
        .and_then(|c| c.execute_batch("CREATE TABLE other (id INTEGER);"))
        .expect("create database");

    let err = load_catalog(&path).expect_err("missing table should fail");
    assert!(matches!(err, CatalogLoadError::Database(_)));
}

#[rstest]
fn missing_database_cannot_be_opened(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "absent.db");
    let err = load_catalog(&path).expect_err("missing database should fail");
    assert!(matches!(err, CatalogLoadError::OpenDatabase { .. }));
}

#[rstest]
fn spreadsheet_rows_load_in_sheet_order(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "PlacesInMadurai.xlsx");
    write_places_workbook(
        &path,
        &[
            ("Meenakshi Amman Temple", "temple", 9.9195, 78.1193, Some(90.0)),
            ("Eco Park", "park", 9.93, 78.14, None),
        ],
    );

    let catalog = load_catalog(&path).expect("workbook should load");
    let names: Vec<&str> = catalog.pois().map(|poi| poi.name.as_str()).collect();
    assert_eq!(names, ["Meenakshi Amman Temple", "Eco Park"]);

    let temple = catalog.as_slice().first().expect("temple row");
    assert_eq!(temple.id, 1);
    assert_eq!(temple.visit_duration_minutes, 90);
    assert_eq!(temple.activities, vec!["Walking", "Photography"]);
    assert!((temple.location.y - 9.9195).abs() < f64::EPSILON);

    let park = catalog.as_slice().get(1).expect("park row");
    assert_eq!(park.address, UNKNOWN_ADDRESS);
    assert_eq!(park.visit_duration_minutes, 30);
}

#[rstest]
fn spreadsheet_rows_share_record_validation(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "places.xlsx");
    write_places_workbook(
        &path,
        &[
            ("Eco Park", "park", 9.93, 78.14, None),
            ("Far North", "park", 95.0, 78.14, None),
        ],
    );

    let err = load_catalog(&path).expect_err("out-of-range row should fail");
    assert!(matches!(err, CatalogLoadError::InvalidRecord { row: 2, .. }));
}

#[rstest]
fn unreadable_workbook_is_reported(temp_dir: TempDir) {
    let path = utf8_path(&temp_dir, "places.xlsx");
    std::fs::write(&path, "not a workbook").expect("write file");

    let err = load_catalog(&path).expect_err("garbage workbook should fail");
    match err {
        CatalogLoadError::Spreadsheet { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected spreadsheet error, got {other:?}"),
    }
}

#[rstest]
#[case("places.json", CatalogFormat::Json)]
#[case("places", CatalogFormat::Json)]
#[case("places.db", CatalogFormat::Sqlite)]
#[case("places.SQLITE", CatalogFormat::Sqlite)]
#[case("places.sqlite3", CatalogFormat::Sqlite)]
#[case("PlacesInMadurai.xlsx", CatalogFormat::Spreadsheet)]
#[case("places.XLS", CatalogFormat::Spreadsheet)]
#[case("places.ods", CatalogFormat::Spreadsheet)]
fn format_follows_extension(#[case] name: &str, #[case] expected: CatalogFormat) {
    assert_eq!(CatalogFormat::from_path(Utf8Path::new(name)), expected);
}
