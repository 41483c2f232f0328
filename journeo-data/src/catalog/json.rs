//! JSON row catalogs.

use camino::Utf8Path;
use journeo_core::MemoryCatalog;

use super::{CatalogLoadError, PlaceRecord, into_catalog};
use crate::fs;

/// Read and validate a JSON row catalog from `path`.
///
/// # Errors
///
/// Returns [`CatalogLoadError::Read`] when the file cannot be read, and the
/// errors of [`parse_json_catalog`] otherwise.
pub fn load_json_catalog(path: &Utf8Path) -> Result<MemoryCatalog, CatalogLoadError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_catalog(&text)
}

/// Parse a JSON array of place rows.
///
/// # Errors
///
/// Returns [`CatalogLoadError::Json`] when the text is not an array of
/// objects, and [`CatalogLoadError::InvalidRecord`] for the first row that
/// fails validation.
///
/// # Examples
/// ```rust
/// use journeo_data::catalog::parse_json_catalog;
///
/// let catalog = parse_json_catalog(
///     r#"[{"place_name": "Eco Park", "Type": "park", "Latitude": 9.93, "Longitude": 78.14}]"#,
/// )?;
/// assert_eq!(catalog.as_slice()[0].visit_duration_minutes, 30);
/// # Ok::<(), journeo_data::CatalogLoadError>(())
/// ```
pub fn parse_json_catalog(text: &str) -> Result<MemoryCatalog, CatalogLoadError> {
    let records: Vec<PlaceRecord> =
        serde_json::from_str(text).map_err(|source| CatalogLoadError::Json { source })?;
    into_catalog(records)
}
