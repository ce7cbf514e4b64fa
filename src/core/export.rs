// LeadRank - core/export.rs
//
// CSV and spreadsheet serialisation of the ranked result set into
// downloadable bytes. Core layer: no file or network I/O; callers decide
// where the bytes go.

use crate::core::model::{Cell, ScoredLeads};
use crate::util::constants::{
    CSV_EXPORT_FILE_NAME, CSV_MIME_TYPE, XLSX_EXPORT_FILE_NAME, XLSX_MIME_TYPE,
};
use crate::util::error::ExportError;
use rust_xlsxwriter::Workbook;

/// A downloadable export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Fixed download file name for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_EXPORT_FILE_NAME,
            ExportFormat::Xlsx => XLSX_EXPORT_FILE_NAME,
        }
    }

    /// Fixed content type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME_TYPE,
            ExportFormat::Xlsx => XLSX_MIME_TYPE,
        }
    }
}

/// A finished export: bytes plus the fixed file-name/content-type pair.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

/// Serialise scored leads in the requested format.
pub fn download(scored: &ScoredLeads, format: ExportFormat) -> Result<Download, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => export_csv(scored)?,
        ExportFormat::Xlsx => export_xlsx(scored)?,
    };
    Ok(Download {
        bytes,
        file_name: format.file_name(),
        mime_type: format.mime_type(),
    })
}

/// Serialise scored leads to CSV bytes.
///
/// One header record of column names in result-set order, one record per
/// row in rank order, no index column. Cell values use the same
/// locale-independent rendering as the filter engine, so exporting the
/// same result set twice is byte-identical.
pub fn export_csv(scored: &ScoredLeads) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        writer
            .write_record(&scored.columns)
            .map_err(|source| ExportError::Csv { source })?;

        for row in &scored.rows {
            writer
                .write_record(row.texts())
                .map_err(|source| ExportError::Csv { source })?;
        }

        writer.flush().map_err(|e| ExportError::Csv {
            source: csv::Error::from(e),
        })?;
    }

    Ok(buf)
}

/// Serialise scored leads to XLSX bytes: a single sheet with the same
/// header and data layout as the CSV export, no index column. Numbers
/// are written as numbers so spreadsheet tools treat them as such.
pub fn export_xlsx(scored: &ScoredLeads) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in scored.columns.iter().enumerate() {
        worksheet
            .write_string(0, col_index(col)?, name.as_str())
            .map_err(|e| ExportError::Xlsx {
                reason: e.to_string(),
            })?;
    }

    for (i, row) in scored.rows.iter().enumerate() {
        let row_index = i as u32 + 1;
        for (col, cell) in row.cells.iter().enumerate() {
            let col = col_index(col)?;
            match cell {
                Cell::Number(n) => worksheet.write_number(row_index, col, *n),
                Cell::Text(s) => worksheet.write_string(row_index, col, s.as_str()),
                Cell::Missing => continue,
            }
            .map_err(|e| ExportError::Xlsx {
                reason: e.to_string(),
            })?;
        }

        let score_col = col_index(row.cells.len())?;
        let category_col = col_index(row.cells.len() + 1)?;
        worksheet
            .write_number(row_index, score_col, row.score)
            .map_err(|e| ExportError::Xlsx {
                reason: e.to_string(),
            })?;
        worksheet
            .write_string(row_index, category_col, row.category.label())
            .map_err(|e| ExportError::Xlsx {
                reason: e.to_string(),
            })?;
    }

    workbook.save_to_buffer().map_err(|e| ExportError::Xlsx {
        reason: e.to_string(),
    })
}

/// XLSX columns are 16-bit; a wider dataset cannot be exported as a sheet.
fn col_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| ExportError::Xlsx {
        reason: format!("column index {col} exceeds the spreadsheet column limit"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LeadCategory, ScoredRow};

    fn scored_fixture() -> ScoredLeads {
        ScoredLeads {
            columns: vec![
                "company".to_string(),
                "employees".to_string(),
                "lead_score_percent".to_string(),
                "lead_category".to_string(),
            ],
            rows: vec![
                ScoredRow {
                    cells: vec![Cell::Text("Acme, Inc.".to_string()), Cell::Number(250.0)],
                    score: 90.0,
                    category: LeadCategory::High,
                },
                ScoredRow {
                    cells: vec![Cell::Text("Globex".to_string()), Cell::Number(12.5)],
                    score: 40.0,
                    category: LeadCategory::Medium,
                },
            ],
        }
    }

    #[test]
    fn test_csv_header_and_row_order() {
        let bytes = export_csv(&scored_fixture()).unwrap();
        let output = String::from_utf8(bytes).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "company,employees,lead_score_percent,lead_category"
        );
        assert_eq!(lines.next().unwrap(), "\"Acme, Inc.\",250,90,High");
        assert_eq!(lines.next().unwrap(), "Globex,12.5,40,Medium");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_export_is_deterministic() {
        let scored = scored_fixture();
        assert_eq!(export_csv(&scored).unwrap(), export_csv(&scored).unwrap());
    }

    #[test]
    fn test_csv_round_trips_values() {
        let scored = scored_fixture();
        let bytes = export_csv(&scored).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, scored.columns);

        let records: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), scored.row_count());
        // Numeric fields parse back to equal values.
        assert_eq!(records[0][1].parse::<f64>().unwrap(), 250.0);
        assert_eq!(records[1][1].parse::<f64>().unwrap(), 12.5);
        assert_eq!(records[0][2].parse::<f64>().unwrap(), 90.0);
    }

    #[test]
    fn test_csv_export_of_empty_result_set_is_header_only() {
        let scored = ScoredLeads {
            columns: vec!["id".to_string(), "lead_score_percent".to_string()],
            rows: Vec::new(),
        };
        let output = String::from_utf8(export_csv(&scored).unwrap()).unwrap();
        assert_eq!(output.trim_end(), "id,lead_score_percent");
    }

    #[test]
    fn test_xlsx_export_produces_a_workbook() {
        let bytes = export_xlsx(&scored_fixture()).unwrap();
        // XLSX is a ZIP container; check the magic instead of re-parsing.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_download_pairs_fixed_names_and_mime_types() {
        let scored = scored_fixture();
        let csv = download(&scored, ExportFormat::Csv).unwrap();
        assert_eq!(csv.file_name, "scored_leads.csv");
        assert_eq!(csv.mime_type, "text/csv");

        let xlsx = download(&scored, ExportFormat::Xlsx).unwrap();
        assert_eq!(xlsx.file_name, "scored_leads.xlsx");
        assert!(xlsx.mime_type.contains("spreadsheetml"));
    }
}
