// LeadRank - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadRank";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LeadRank";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Scoring service
// =============================================================================

/// Total wait bound for one scoring request, in seconds. A call that has
/// not completed within this window is reported as a timeout failure.
pub const DEFAULT_SCORING_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable scoring timeout (seconds).
pub const MIN_SCORING_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable scoring timeout (seconds).
pub const MAX_SCORING_TIMEOUT_SECS: u64 = 600;

/// Upper bound on the scoring response body size in bytes. Responses larger
/// than this are treated as malformed rather than buffered without limit.
pub const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024; // 16 MB

/// Column name the scoring service uses for the numeric score.
pub const SCORE_COLUMN: &str = "lead_score_percent";

/// Column name the scoring service uses for the category bucket.
pub const CATEGORY_COLUMN: &str = "lead_category";

// =============================================================================
// Ranking
// =============================================================================

/// Number of top-ranked rows averaged for the headline score metric.
pub const TOP_RANK_WINDOW: usize = 10;

// =============================================================================
// Export
// =============================================================================

/// Default file name for CSV downloads.
pub const CSV_EXPORT_FILE_NAME: &str = "scored_leads.csv";

/// Default file name for spreadsheet downloads.
pub const XLSX_EXPORT_FILE_NAME: &str = "scored_leads.xlsx";

/// Content type served with CSV downloads.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Content type served with spreadsheet downloads.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// =============================================================================
// Configuration
// =============================================================================

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
