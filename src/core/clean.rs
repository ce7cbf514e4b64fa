// LeadRank - core/clean.rs
//
// Dataset cleaner: normalises a raw dataset into a scoring-ready one.
// Core layer: pure logic, no I/O or network dependencies.

use crate::core::model::{Cell, Dataset};

/// Clean a raw dataset for scoring.
///
/// Two passes over each row: every non-finite number (NaN, ±inf) is
/// normalised to `Cell::Missing`, then any row still containing a
/// `Missing` cell in any column is dropped whole. No cell imputation.
///
/// The output keeps the column set and order unchanged, and surviving
/// rows keep their relative order (a stable sub-sequence of the input).
/// Dropping every row yields an empty dataset, which downstream scoring
/// treats as a no-op success.
pub fn clean(raw: &Dataset) -> Dataset {
    let rows: Vec<Vec<Cell>> = raw
        .rows
        .iter()
        .filter_map(|row| {
            let normalised: Vec<Cell> = row
                .iter()
                .map(|cell| {
                    if cell.is_non_finite() {
                        Cell::Missing
                    } else {
                        cell.clone()
                    }
                })
                .collect();

            if normalised.iter().any(Cell::is_missing) {
                None
            } else {
                Some(normalised)
            }
        })
        .collect();

    Dataset {
        columns: raw.columns.clone(),
        rows,
    }
}
