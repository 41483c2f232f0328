//! Spreadsheet catalogs: the first worksheet of an Excel or OpenDocument
//! workbook, with a header row naming the columns.

use calamine::{Data, Range, Reader, open_workbook_auto};
use camino::Utf8Path;
use journeo_core::MemoryCatalog;

use super::{CatalogLoadError, PlaceRecord, into_catalog};

/// Read and validate the first worksheet of the workbook at `path`.
///
/// Headers are matched case-insensitively, so `Type` and `type` both name
/// the category column. Blank rows are skipped; row numbers count the
/// remaining data rows from 1.
///
/// # Errors
///
/// Returns [`CatalogLoadError::Spreadsheet`] when the workbook cannot be
/// opened or its first sheet read, [`CatalogLoadError::EmptyWorkbook`] when
/// it holds no sheets, and the errors of [`records_from_range`] otherwise.
pub fn load_spreadsheet_catalog(path: &Utf8Path) -> Result<MemoryCatalog, CatalogLoadError> {
    let spreadsheet_error = |source: calamine::Error| CatalogLoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogLoadError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(spreadsheet_error)?;
    into_catalog(records_from_range(&range)?)
}

/// Turn a worksheet range with a header row into place records.
///
/// # Errors
///
/// Returns [`CatalogLoadError::InvalidRecord`] when a coordinate or visit
/// duration cell holds text that is not a number.
pub fn records_from_range(range: &Range<Data>) -> Result<Vec<PlaceRecord>, CatalogLoadError> {
    let mut rows = range.rows();
    let Some(headers) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::from_headers(headers);
    rows.filter(|cells| !cells.iter().all(is_blank))
        .zip(1_u64..)
        .map(|(cells, row)| columns.record(cells, row))
        .collect()
}

/// Positions of the known columns within a row.
#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    category: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    address: Option<usize>,
    description: Option<usize>,
    activities: Option<usize>,
    visit_duration: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[Data]) -> Self {
        let mut columns = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let Data::String(header) = header else {
                continue;
            };
            let slot = match header.trim().to_ascii_lowercase().as_str() {
                "place_name" => &mut columns.name,
                "type" => &mut columns.category,
                "latitude" => &mut columns.latitude,
                "longitude" => &mut columns.longitude,
                "address" => &mut columns.address,
                "description" => &mut columns.description,
                "activities" => &mut columns.activities,
                "visit_duration" => &mut columns.visit_duration,
                _ => continue,
            };
            slot.get_or_insert(index);
        }
        columns
    }

    fn record(&self, cells: &[Data], row: u64) -> Result<PlaceRecord, CatalogLoadError> {
        let cell = |column: Option<usize>| column.and_then(|index| cells.get(index));
        let number = |column: Option<usize>, header: &str| {
            cell(column)
                .map_or(Ok(None), number_cell)
                .map_err(|()| CatalogLoadError::InvalidRecord {
                    row,
                    reason: format!("{header} is not a number"),
                })
        };
        Ok(PlaceRecord {
            name: cell(self.name).and_then(text_cell),
            category: cell(self.category).and_then(text_cell),
            latitude: number(self.latitude, "Latitude")?,
            longitude: number(self.longitude, "Longitude")?,
            address: cell(self.address).and_then(text_cell),
            description: cell(self.description).and_then(text_cell),
            activities: cell(self.activities).and_then(text_cell),
            visit_duration: number(self.visit_duration, "visit_duration")?,
        })
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn text_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) if text.trim().is_empty() => None,
        Data::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn number_cell(cell: &Data) -> Result<Option<f64>, ()> {
    match cell {
        Data::Empty => Ok(None),
        Data::Float(value) => Ok(Some(*value)),
        // Spreadsheet integers are far below the 2^53 precision limit.
        Data::Int(value) => Ok(Some(*value as f64)),
        Data::String(text) if text.trim().is_empty() => Ok(None),
        Data::String(text) => text.trim().parse().map(Some).map_err(|_| ()),
        _ => Err(()),
    }
}
