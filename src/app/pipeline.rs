// LeadRank - app/pipeline.rs
//
// One scoring run end-to-end: clean → score → merge → store.
// All stages execute sequentially within the calling thread; the only
// blocking point is the scoring client's network call.

use crate::app::scoring::ScoringClient;
use crate::app::session::Session;
use crate::core::clean::clean;
use crate::core::merge::{merge, summarize};
use crate::core::model::{Dataset, ScoreSummary};
use crate::util::error::Result;

/// Outcome of a completed scoring run, for display to the user.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rows in the uploaded dataset.
    pub raw_rows: usize,

    /// Rows that survived cleaning and were scored.
    pub scored_rows: usize,

    /// Rows dropped by the cleaner (missing or non-finite values).
    pub dropped_rows: usize,

    /// Column count of the ranked result set (input columns plus the
    /// two prediction columns).
    pub columns: usize,

    /// Headline metrics over the ranked result set.
    pub summary: ScoreSummary,
}

/// Run the full scoring pipeline over a raw dataset.
///
/// The session slot is written last, only after every stage has
/// succeeded: any ingestion, scoring, or merge failure propagates out
/// and leaves the previous ranked result set (if any) untouched.
pub fn run(
    raw: &Dataset,
    client: &ScoringClient,
    session: &mut Session,
) -> Result<RunReport> {
    let cleaned = clean(raw);
    let dropped = raw.row_count() - cleaned.row_count();
    tracing::info!(
        raw = raw.row_count(),
        cleaned = cleaned.row_count(),
        dropped,
        "Dataset cleaned"
    );

    let predictions = client.score(&cleaned)?;
    let scored = merge(&cleaned, predictions)?;
    let summary = summarize(&scored);

    let report = RunReport {
        raw_rows: raw.row_count(),
        scored_rows: scored.row_count(),
        dropped_rows: dropped,
        columns: scored.columns.len(),
        summary,
    };

    session.store(scored);
    Ok(report)
}
