// LeadRank - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no network,
// no platform dependencies (Core depends on std + serde only).
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

// =============================================================================
// Cell (one scalar value in a lead row)
// =============================================================================

/// One scalar value in a lead row.
///
/// The explicit `Missing` variant is what makes the cleaning rule
/// checkable: a non-finite number is normalised to `Missing` and any
/// row containing `Missing` in any column is dropped before scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A numeric value. May be non-finite on ingest; never after cleaning.
    Number(f64),

    /// A textual value.
    Text(String),

    /// An absent value (empty cell, NA, or a normalised non-finite number).
    Missing,
}

impl Cell {
    /// True for `Missing` cells.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// True for `Number` cells holding NaN or an infinity.
    pub fn is_non_finite(&self) -> bool {
        matches!(self, Cell::Number(n) if !n.is_finite())
    }

    /// Locale-independent text form, used for filtering and CSV export.
    ///
    /// Numbers use Rust's shortest round-trip `f64` formatting (`40`, not
    /// `40.0`), so exporting the same value twice is byte-identical and
    /// parsing the text back yields an equal number.
    pub fn render(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// Dataset (ordered columns x ordered rows)
// =============================================================================

/// An ordered tabular dataset: named columns and rows of cells.
///
/// Invariant: every row has exactly `columns.len()` cells. Column order
/// is significant and preserved end-to-end, including on the wire and
/// in exports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names, in input order.
    pub columns: Vec<String>,

    /// Rows, in input order. Row *i* cell *j* belongs to `columns[j]`.
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create an empty dataset with the given column set.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Lead category
// =============================================================================

/// Coarse score bucket assigned by the scoring service.
///
/// A closed set: any other string in a service response is a malformed
/// body, never passed through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadCategory {
    High,
    Medium,
    Low,
}

impl LeadCategory {
    /// Returns all variants in display order (best bucket first).
    pub fn all() -> &'static [LeadCategory] {
        &[LeadCategory::High, LeadCategory::Medium, LeadCategory::Low]
    }

    /// Human-readable label for display and export.
    pub fn label(&self) -> &'static str {
        match self {
            LeadCategory::High => "High",
            LeadCategory::Medium => "Medium",
            LeadCategory::Low => "Low",
        }
    }
}

impl std::fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Prediction (one per surviving row, from the scoring service)
// =============================================================================

/// One scoring-service prediction, paired positionally with a cleaned row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    /// Numeric lead score, expected range 0-100.
    pub lead_score_percent: f64,

    /// Coarse bucket for the score.
    pub lead_category: LeadCategory,
}

// =============================================================================
// Scored leads (the ranked result set)
// =============================================================================

/// One cleaned row concatenated with its prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    /// The cleaned input cells, in dataset column order.
    pub cells: Vec<Cell>,

    /// `lead_score_percent` from the prediction.
    pub score: f64,

    /// `lead_category` from the prediction.
    pub category: LeadCategory,
}

impl ScoredRow {
    /// Text form of every cell including the two prediction columns,
    /// in export column order. Shared by the filter engine and the CSV
    /// exporter so a query matches exactly what an export would show.
    pub fn texts(&self) -> Vec<String> {
        let mut out: Vec<String> = self.cells.iter().map(Cell::render).collect();
        out.push(Cell::Number(self.score).render());
        out.push(self.category.label().to_string());
        out
    }
}

/// The ranked result set of one scoring run: cleaned columns followed by
/// the two prediction columns, rows sorted by score descending (stable,
/// ties keep cleaned-dataset order).
///
/// This is the unit held in the session slot. Filtering and export read
/// it; only a completed scoring run replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLeads {
    /// Cleaned column names followed by `lead_score_percent` and
    /// `lead_category`.
    pub columns: Vec<String>,

    /// Scored rows in rank order.
    pub rows: Vec<ScoredRow>,
}

impl ScoredLeads {
    /// Number of scored rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the scoring run produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Score summary (derived view, recomputed on demand)
// =============================================================================

/// Headline metrics over a ranked result set.
///
/// Derived, never stored: recompute from the `ScoredLeads` as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    /// Mean score of the top-ranked rows (up to `TOP_RANK_WINDOW`).
    /// `None` when the result set is empty.
    pub top_mean: Option<f64>,

    /// Row count per category. Absent categories have no entry.
    pub category_counts: HashMap<LeadCategory, usize>,
}

impl ScoreSummary {
    /// Count for one category (0 when absent).
    pub fn count(&self, category: LeadCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_rendering_is_shortest_round_trip() {
        assert_eq!(Cell::Number(40.0).render(), "40");
        assert_eq!(Cell::Number(87.5).render(), "87.5");
        assert_eq!(Cell::Number(-3.25).render(), "-3.25");
        assert_eq!(Cell::Missing.render(), "");
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(Cell::Number(f64::NAN).is_non_finite());
        assert!(Cell::Number(f64::INFINITY).is_non_finite());
        assert!(Cell::Number(f64::NEG_INFINITY).is_non_finite());
        assert!(!Cell::Number(0.0).is_non_finite());
        assert!(!Cell::Text("inf".to_string()).is_non_finite());
    }

    #[test]
    fn test_category_round_trip_through_json() {
        let parsed: LeadCategory = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(parsed, LeadCategory::High);
        assert!(serde_json::from_str::<LeadCategory>("\"VeryHigh\"").is_err());
    }

    #[test]
    fn test_scored_row_texts_include_prediction_columns() {
        let row = ScoredRow {
            cells: vec![Cell::Text("Acme".to_string()), Cell::Number(12.0)],
            score: 90.0,
            category: LeadCategory::High,
        };
        assert_eq!(row.texts(), vec!["Acme", "12", "90", "High"]);
    }
}
