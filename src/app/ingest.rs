// LeadRank - app/ingest.rs
//
// Input boundary: load a lead file (.xlsx, .xls, or .csv) into a Dataset.
// App layer: owns file I/O; the core layer never touches the filesystem.
//
// The file is read whole, not streamed. Zero rows or zero columns are
// valid inputs and flow through as empty datasets.

use crate::core::model::{Cell, Dataset};
use crate::util::error::IngestError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Load a lead file into a dataset based on its extension.
///
/// The first row is the header. Workbooks read their first sheet only,
/// matching the upload behaviour this pipeline replaces.
pub fn load_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let dataset = match extension.as_str() {
        "xlsx" | "xls" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    };

    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "Lead file loaded"
    );
    Ok(dataset)
}

/// Load the first sheet of a workbook.
fn load_workbook(path: &Path) -> Result<Dataset, IngestError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoSheets {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header.iter().map(header_text).collect(),
        None => return Ok(Dataset::default()),
    };

    // Workbook ranges are rectangular, so every data row already has the
    // header's width.
    let rows = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(Dataset { columns, rows })
}

/// Header cells become column names; non-string header cells keep their
/// display form.
fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce one workbook cell into the pipeline's scalar kinds.
///
/// Booleans become text, Excel error cells behave like NA, and date-time
/// cells keep their numeric serial value.
fn workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Missing,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Missing
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Error(_) => Cell::Missing,
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Load a CSV file. Numeric cells are inferred by f64 parse; empty
/// fields are missing values. Non-finite spellings ("NaN", "inf") parse
/// as numbers here and are normalised away by the cleaner.
fn load_csv(path: &Path) -> Result<Dataset, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(csv_cell).collect());
    }

    Ok(Dataset { columns, rows })
}

/// Coerce one CSV field into the pipeline's scalar kinds.
fn csv_cell(field: &str) -> Cell {
    if field.trim().is_empty() {
        return Cell::Missing;
    }
    match field.trim().parse::<f64>() {
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(field.to_string()),
    }
}
