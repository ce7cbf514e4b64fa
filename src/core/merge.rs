// LeadRank - core/merge.rs
//
// Result merger: pairs cleaned rows with predictions positionally and
// ranks the combined rows by score.
// Core layer: pure logic, no I/O or network dependencies.

use crate::core::model::{Dataset, Prediction, ScoreSummary, ScoredLeads, ScoredRow};
use crate::util::constants::{CATEGORY_COLUMN, SCORE_COLUMN, TOP_RANK_WINDOW};
use crate::util::error::MergeError;
use std::collections::HashMap;

/// Merge cleaned rows with their predictions into a ranked result set.
///
/// Row *i* of `cleaned` is paired with prediction *i* — ordinal
/// correspondence, not a key join. The pairing is only defined when the
/// two sequences have equal length; any mismatch fails whole with
/// `MergeError::LengthMismatch` (never truncated or padded).
///
/// The merged rows are sorted by score descending with a stable sort,
/// so equal scores keep their cleaned-dataset order.
pub fn merge(
    cleaned: &Dataset,
    predictions: Vec<Prediction>,
) -> Result<ScoredLeads, MergeError> {
    if predictions.len() != cleaned.rows.len() {
        return Err(MergeError::LengthMismatch {
            rows: cleaned.rows.len(),
            predictions: predictions.len(),
        });
    }

    let mut rows: Vec<ScoredRow> = cleaned
        .rows
        .iter()
        .zip(predictions)
        .map(|(cells, prediction)| ScoredRow {
            cells: cells.clone(),
            score: prediction.lead_score_percent,
            category: prediction.lead_category,
        })
        .collect();

    // Vec::sort_by is stable: ties keep pre-sort (cleaned-dataset) order.
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut columns = cleaned.columns.clone();
    columns.push(SCORE_COLUMN.to_string());
    columns.push(CATEGORY_COLUMN.to_string());

    Ok(ScoredLeads { columns, rows })
}

/// Compute the headline metrics for a ranked result set.
///
/// A derived view over `scored`, recomputed on demand: the mean score of
/// the top `TOP_RANK_WINDOW` rows by rank (`None` for an empty set) and
/// a count per category.
pub fn summarize(scored: &ScoredLeads) -> ScoreSummary {
    let top_mean = if scored.is_empty() {
        None
    } else {
        let window = &scored.rows[..scored.rows.len().min(TOP_RANK_WINDOW)];
        let sum: f64 = window.iter().map(|r| r.score).sum();
        Some(sum / window.len() as f64)
    };

    let mut category_counts: HashMap<_, usize> = HashMap::new();
    for row in &scored.rows {
        *category_counts.entry(row.category).or_insert(0) += 1;
    }

    ScoreSummary {
        top_mean,
        category_counts,
    }
}
