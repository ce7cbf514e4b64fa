// LeadRank - core/filter.rs
//
// Text query filter over the ranked result set.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{ScoredLeads, ScoredRow};

/// Apply a text query to scored leads, returning indices of matching rows.
///
/// Returns a Vec of indices into `scored.rows`, always strictly
/// increasing: matching rows keep their rank order, and the rank is not
/// recomputed. Only the empty query matches every row; any other query,
/// whitespace included, is matched literally.
///
/// A row matches when the case-insensitive text form of at least one of
/// its cells — including the two prediction columns — contains the query
/// as a substring. Never mutates the result set.
pub fn matching_indices(scored: &ScoredLeads, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..scored.rows.len()).collect();
    }

    let query_lower = query.to_lowercase();

    scored
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_query(row, &query_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check whether any cell's text form contains the lowercased query.
fn matches_query(row: &ScoredRow, query_lower: &str) -> bool {
    row.texts()
        .iter()
        .any(|text| text.to_lowercase().contains(query_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Cell, LeadCategory};

    fn scored_fixture() -> ScoredLeads {
        let row = |name: &str, region: &str, score: f64, category: LeadCategory| ScoredRow {
            cells: vec![Cell::Text(name.to_string()), Cell::Text(region.to_string())],
            score,
            category,
        };
        ScoredLeads {
            columns: vec![
                "company".to_string(),
                "region".to_string(),
                "lead_score_percent".to_string(),
                "lead_category".to_string(),
            ],
            rows: vec![
                row("Acme Corp", "EMEA", 90.0, LeadCategory::High),
                row("Globex", "APAC", 61.5, LeadCategory::Medium),
                row("Initech", "EMEA", 40.0, LeadCategory::Medium),
                row("Umbrella", "AMER", 12.0, LeadCategory::Low),
            ],
        }
    }

    #[test]
    fn test_empty_query_returns_all_rows() {
        let scored = scored_fixture();
        assert_eq!(matching_indices(&scored, ""), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_whitespace_query_is_substring_matched_not_match_all() {
        let scored = scored_fixture();
        // "Acme Corp" is the only cell containing a space: a whitespace
        // query is a literal query, not an empty one.
        assert_eq!(matching_indices(&scored, " "), vec![0]);
        assert_eq!(matching_indices(&scored, "  "), Vec::<usize>::new());
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let scored = scored_fixture();
        assert_eq!(matching_indices(&scored, "acme"), vec![0]);
        assert_eq!(matching_indices(&scored, "GLOBEX"), vec![1]);
        assert_eq!(matching_indices(&scored, "emea"), vec![0, 2]);
    }

    #[test]
    fn test_query_matches_prediction_columns() {
        let scored = scored_fixture();
        // Category text and rendered score are both searchable.
        assert_eq!(matching_indices(&scored, "medium"), vec![1, 2]);
        assert_eq!(matching_indices(&scored, "61.5"), vec![1]);
    }

    #[test]
    fn test_result_is_order_preserving_subsequence() {
        let scored = scored_fixture();
        let indices = matching_indices(&scored, "e");
        for pair in indices.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_no_match_returns_empty() {
        let scored = scored_fixture();
        assert!(matching_indices(&scored, "zzz-no-such-lead").is_empty());
    }
}
