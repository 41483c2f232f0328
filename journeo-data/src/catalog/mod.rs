//! Loading the POI catalog from disk.
//!
//! Three layouts are supported, all carrying the columns of the Madurai
//! places spreadsheet:
//!
//! - the spreadsheet itself (`.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`),
//!   read from its first worksheet;
//! - a JSON array of row objects keyed by the spreadsheet headers
//!   (`place_name`, `Type`, `Latitude`, `Longitude`, `Address`,
//!   `Description`, `Activities`, `visit_duration`);
//! - a SQLite database with a `places` table using lower-case column names.
//!
//! Rows are validated on the way in. Missing optional columns take the
//! catalog defaults, while rows without usable coordinates are rejected with
//! [`CatalogLoadError::InvalidRecord`]. Record identifiers are the 1-based
//! row numbers, so catalog order is preserved end to end.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use journeo_core::{MemoryCatalog, PointOfInterest};
use serde::Deserialize;
use thiserror::Error;

mod json;
mod spreadsheet;
mod sqlite;

pub use json::{load_json_catalog, parse_json_catalog};
pub use spreadsheet::{load_spreadsheet_catalog, records_from_range};
pub use sqlite::load_sqlite_catalog;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog file could not be read.
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The JSON document did not hold an array of place rows.
    #[error("failed to parse JSON catalog: {source}")]
    Json {
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite catalog at {path}: {source}")]
    OpenDatabase {
        /// Location of the database.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The workbook could not be opened or its first worksheet read.
    #[error("failed to read spreadsheet catalog at {path}: {source}")]
    Spreadsheet {
        /// Location of the workbook.
        path: Utf8PathBuf,
        /// Source error returned by `calamine`.
        #[source]
        source: calamine::Error,
    },
    /// The workbook holds no worksheets.
    #[error("spreadsheet catalog at {path} has no worksheets")]
    EmptyWorkbook {
        /// Location of the workbook.
        path: Utf8PathBuf,
    },
    /// Reading rows from the `places` table failed.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    /// A row was missing a required column or held an unusable value.
    #[error("catalog row {row} is invalid: {reason}")]
    InvalidRecord {
        /// 1-based row number.
        row: u64,
        /// What was wrong with the row.
        reason: String,
    },
}

/// Storage layout of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON array of spreadsheet rows.
    Json,
    /// SQLite database with a `places` table.
    Sqlite,
    /// Excel or OpenDocument workbook; the first sheet holds the rows.
    Spreadsheet,
}

impl CatalogFormat {
    /// Infer the layout from a file extension.
    ///
    /// `.db`, `.sqlite` and `.sqlite3` select SQLite; `.xlsx`, `.xlsm`,
    /// `.xlsb`, `.xls` and `.ods` select the spreadsheet reader; everything
    /// else, including a missing extension, is read as JSON.
    ///
    /// # Examples
    /// ```rust
    /// use camino::Utf8Path;
    /// use journeo_data::CatalogFormat;
    ///
    /// assert_eq!(CatalogFormat::from_path(Utf8Path::new("madurai.DB")), CatalogFormat::Sqlite);
    /// assert_eq!(CatalogFormat::from_path(Utf8Path::new("places.json")), CatalogFormat::Json);
    /// assert_eq!(
    ///     CatalogFormat::from_path(Utf8Path::new("PlacesInMadurai.xlsx")),
    ///     CatalogFormat::Spreadsheet
    /// );
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("db" | "sqlite" | "sqlite3") => Self::Sqlite,
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Spreadsheet,
            _ => Self::Json,
        }
    }
}

/// Load the catalog at `path`, picking the loader from its extension.
///
/// # Errors
///
/// Returns a [`CatalogLoadError`] when the file cannot be read or decoded, or
/// when any row fails validation.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use journeo_data::load_catalog;
///
/// let catalog = load_catalog(Utf8Path::new("data/madurai_places.json"))?;
/// println!("{} places", catalog.len());
/// # Ok::<(), journeo_data::CatalogLoadError>(())
/// ```
pub fn load_catalog(path: &Utf8Path) -> Result<MemoryCatalog, CatalogLoadError> {
    let catalog = match CatalogFormat::from_path(path) {
        CatalogFormat::Json => load_json_catalog(path)?,
        CatalogFormat::Sqlite => load_sqlite_catalog(path)?,
        CatalogFormat::Spreadsheet => load_spreadsheet_catalog(path)?,
    };
    if catalog.is_empty() {
        log::warn!("catalog at {path} holds no places");
    } else {
        log::info!("loaded {} places from {path}", catalog.len());
    }
    Ok(catalog)
}

/// One raw catalog row before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceRecord {
    /// Display name (`place_name`).
    #[serde(default, rename = "place_name")]
    pub name: Option<String>,
    /// Category label (`Type`).
    #[serde(default, rename = "Type")]
    pub category: Option<String>,
    /// Latitude in degrees (`Latitude`).
    #[serde(default, rename = "Latitude")]
    pub latitude: Option<f64>,
    /// Longitude in degrees (`Longitude`).
    #[serde(default, rename = "Longitude")]
    pub longitude: Option<f64>,
    /// Street address (`Address`).
    #[serde(default, rename = "Address")]
    pub address: Option<String>,
    /// Free-text description (`Description`).
    #[serde(default, rename = "Description")]
    pub description: Option<String>,
    /// Comma-separated activities (`Activities`).
    #[serde(default, rename = "Activities")]
    pub activities: Option<String>,
    /// Visit length in minutes (`visit_duration`).
    #[serde(default)]
    pub visit_duration: Option<f64>,
}

impl PlaceRecord {
    /// Validate the row and build a [`PointOfInterest`] with id `row`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError::InvalidRecord`] when the name, category or
    /// coordinates are missing, a coordinate is outside WGS84 bounds, or the
    /// visit duration is negative or not finite.
    pub fn into_poi(self, row: u64) -> Result<PointOfInterest, CatalogLoadError> {
        let invalid = |reason: &str| CatalogLoadError::InvalidRecord {
            row,
            reason: reason.to_owned(),
        };
        let name = self.name.ok_or_else(|| invalid("missing place_name"))?;
        let category = self.category.ok_or_else(|| invalid("missing Type"))?;
        let latitude = self
            .latitude
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .ok_or_else(|| invalid("missing or out-of-range Latitude"))?;
        let longitude = self
            .longitude
            .filter(|lon| (-180.0..=180.0).contains(lon))
            .ok_or_else(|| invalid("missing or out-of-range Longitude"))?;

        let mut poi = PointOfInterest::new(
            row,
            name,
            category,
            Coord {
                x: longitude,
                y: latitude,
            },
        );
        if let Some(address) = self.address {
            poi = poi.with_address(address);
        }
        if let Some(description) = self.description {
            poi = poi.with_description(description);
        }
        if let Some(activities) = self.activities {
            poi = poi.with_activities(&activities);
        }
        if let Some(minutes) = self.visit_duration {
            poi = poi.with_visit_duration(whole_minutes(minutes).ok_or_else(|| {
                invalid("visit_duration must be a non-negative number of minutes")
            })?);
        }
        Ok(poi)
    }
}

/// Round a minute count from the data set to a whole `u32`.
fn whole_minutes(minutes: f64) -> Option<u32> {
    let rounded = minutes.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return None;
    }
    // In range and integral after the check above.
    Some(rounded as u32)
}

/// Validate `records` in order, numbering rows from 1.
fn into_catalog<I>(records: I) -> Result<MemoryCatalog, CatalogLoadError>
where
    I: IntoIterator<Item = PlaceRecord>,
{
    records
        .into_iter()
        .zip(1_u64..)
        .map(|(record, row)| record.into_poi(row))
        .collect::<Result<Vec<_>, _>>()
        .map(MemoryCatalog::with_pois)
}

#[cfg(test)]
mod tests;
