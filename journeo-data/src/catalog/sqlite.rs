//! SQLite catalogs stored in a `places` table.

use camino::Utf8Path;
use journeo_core::MemoryCatalog;
use rusqlite::{Connection, OpenFlags, Row};

use super::{CatalogLoadError, PlaceRecord, into_catalog};

const SELECT_PLACES: &str = "SELECT place_name, type, latitude, longitude, address, \
     description, activities, visit_duration FROM places ORDER BY rowid";

/// Read and validate the `places` table of the SQLite database at `path`.
///
/// The database is opened read-only and rows are taken in `rowid` order.
///
/// # Errors
///
/// Returns [`CatalogLoadError::OpenDatabase`] when the file cannot be opened,
/// [`CatalogLoadError::Database`] when the table is missing or a column has
/// an unexpected type, and [`CatalogLoadError::InvalidRecord`] for the first
/// row that fails validation.
pub fn load_sqlite_catalog(path: &Utf8Path) -> Result<MemoryCatalog, CatalogLoadError> {
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| CatalogLoadError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;
    let mut statement = connection.prepare(SELECT_PLACES)?;
    let records = statement
        .query_map([], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    into_catalog(records)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PlaceRecord> {
    Ok(PlaceRecord {
        name: row.get(0)?,
        category: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        address: row.get(4)?,
        description: row.get(5)?,
        activities: row.get(6)?,
        visit_duration: row.get(7)?,
    })
}
