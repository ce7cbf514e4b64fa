// LeadRank - app/session.rs
//
// Session state: the single slot holding the most recent ranked result
// set for reuse by filtering and export within one interactive session.
//
// Design principles:
// - Single owner, single writer: the slot is written only at the end of
//   a successful scoring run (see app::pipeline), so a failed run leaves
//   the previous results intact.
// - Filter and export take the session by shared reference and never
//   mutate it.
// - Nothing is persisted; the slot dies with the session.

use crate::core::export::{self, Download, ExportFormat};
use crate::core::model::ScoredLeads;
use crate::util::error::ExportError;

/// Per-session mutable slot for the latest ranked result set.
#[derive(Debug, Default)]
pub struct Session {
    scored: Option<ScoredLeads>,
}

impl Session {
    /// Fresh session with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a scoring run has completed successfully.
    pub fn has_results(&self) -> bool {
        self.scored.is_some()
    }

    /// The current ranked result set, if any.
    pub fn scored(&self) -> Option<&ScoredLeads> {
        self.scored.as_ref()
    }

    /// Replace the slot with the results of a completed scoring run.
    pub fn store(&mut self, scored: ScoredLeads) {
        tracing::debug!(rows = scored.row_count(), "Session results replaced");
        self.scored = Some(scored);
    }

    /// Drop the current results (session end).
    pub fn clear(&mut self) {
        self.scored = None;
    }

    /// Export the current results in the requested format.
    ///
    /// Fails with `ExportError::NoScoredLeads` when no scoring run has
    /// completed yet — a user-actionable warning, not a crash.
    pub fn export(&self, format: ExportFormat) -> Result<Download, ExportError> {
        let scored = self.scored.as_ref().ok_or(ExportError::NoScoredLeads)?;
        export::download(scored, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Cell, LeadCategory, ScoredRow};

    fn scored_fixture() -> ScoredLeads {
        ScoredLeads {
            columns: vec![
                "id".to_string(),
                "lead_score_percent".to_string(),
                "lead_category".to_string(),
            ],
            rows: vec![ScoredRow {
                cells: vec![Cell::Number(1.0)],
                score: 75.0,
                category: LeadCategory::High,
            }],
        }
    }

    #[test]
    fn test_export_before_any_run_is_unavailable_with_zero_bytes() {
        let session = Session::new();
        match session.export(ExportFormat::Csv) {
            Err(ExportError::NoScoredLeads) => {}
            other => panic!("expected NoScoredLeads, got {other:?}"),
        }
        assert!(!session.has_results());
    }

    #[test]
    fn test_store_then_export() {
        let mut session = Session::new();
        session.store(scored_fixture());
        let download = session.export(ExportFormat::Csv).unwrap();
        assert!(!download.bytes.is_empty());
        assert_eq!(download.file_name, "scored_leads.csv");
    }

    #[test]
    fn test_store_overwrites_previous_results() {
        let mut session = Session::new();
        session.store(scored_fixture());

        let mut next = scored_fixture();
        next.rows[0].score = 10.0;
        next.rows[0].category = LeadCategory::Low;
        session.store(next);

        let scored = session.scored().unwrap();
        assert_eq!(scored.rows[0].score, 10.0);
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let mut session = Session::new();
        session.store(scored_fixture());
        session.clear();
        assert!(session.scored().is_none());
    }
}
