// LeadRank - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadRank operations.
/// Errors are categorised by the pipeline stage that produced them.
#[derive(Debug)]
pub enum LeadRankError {
    /// The raw lead file could not be parsed as tabular data.
    Ingest(IngestError),

    /// The scoring service round-trip failed.
    Scoring(ScoringError),

    /// Predictions could not be merged onto the cleaned rows.
    Merge(MergeError),

    /// Export serialisation failed or no scored results exist.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LeadRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "Ingestion error: {e}"),
            Self::Scoring(e) => write!(f, "Scoring service error: {e}"),
            Self::Merge(e) => write!(f, "Merge error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LeadRankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Scoring(e) => Some(e),
            Self::Merge(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a lead file into a dataset.
/// All halt the pipeline before the cleaner runs.
#[derive(Debug)]
pub enum IngestError {
    /// The file extension is not one of the supported tabular formats.
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The workbook could not be opened or decoded.
    Workbook { path: PathBuf, reason: String },

    /// The workbook contains no sheets.
    NoSheets { path: PathBuf },

    /// A CSV record could not be read.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path, extension } => write!(
                f,
                "'{}': unsupported format '.{extension}' (expected .xlsx, .xls, or .csv)",
                path.display()
            ),
            Self::Workbook { path, reason } => {
                write!(f, "'{}': cannot read workbook: {reason}", path.display())
            }
            Self::NoSheets { path } => {
                write!(f, "'{}': workbook contains no sheets", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "'{}': CSV parse error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<IngestError> for LeadRankError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Scoring errors
// ---------------------------------------------------------------------------

/// Failure modes of one scoring round-trip, each surfaced distinctly.
/// None of these are retried automatically; a user-triggered re-run is
/// the retry mechanism.
#[derive(Debug)]
pub enum ScoringError {
    /// Network or connection failure before a response arrived.
    Transport { endpoint: String, reason: String },

    /// The fixed wait bound elapsed before the service responded.
    Timeout { endpoint: String, limit_secs: u64 },

    /// The service answered with a non-success HTTP status.
    Status {
        endpoint: String,
        code: u16,
        body: String,
    },

    /// The response body could not be decoded as predictions.
    MalformedBody { endpoint: String, reason: String },

    /// The service reported an explicit error in the response body.
    Service { endpoint: String, message: String },

    /// The service returned a different number of predictions than rows sent.
    LengthMismatch { sent: usize, received: usize },

    /// The request body could not be serialised.
    Serialize { source: serde_json::Error },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, reason } => {
                write!(f, "cannot reach '{endpoint}': {reason}")
            }
            Self::Timeout {
                endpoint,
                limit_secs,
            } => write!(f, "'{endpoint}' did not respond within {limit_secs}s"),
            Self::Status {
                endpoint,
                code,
                body,
            } => write!(f, "'{endpoint}' returned HTTP {code}: {body}"),
            Self::MalformedBody { endpoint, reason } => {
                write!(f, "'{endpoint}' returned an unreadable body: {reason}")
            }
            Self::Service { endpoint, message } => {
                write!(f, "'{endpoint}' reported an error: {message}")
            }
            Self::LengthMismatch { sent, received } => write!(
                f,
                "sent {sent} rows but received {received} predictions"
            ),
            Self::Serialize { source } => {
                write!(f, "cannot serialise request body: {source}")
            }
        }
    }
}

impl std::error::Error for ScoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ScoringError> for LeadRankError {
    fn from(e: ScoringError) -> Self {
        Self::Scoring(e)
    }
}

// ---------------------------------------------------------------------------
// Merge errors
// ---------------------------------------------------------------------------

/// Errors raised while pairing cleaned rows with predictions.
#[derive(Debug)]
pub enum MergeError {
    /// Prediction count does not match the cleaned-row count.
    /// Fatal for the run: no partial merge is ever produced.
    LengthMismatch { rows: usize, predictions: usize },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { rows, predictions } => write!(
                f,
                "{predictions} predictions cannot be paired with {rows} cleaned rows"
            ),
        }
    }
}

impl std::error::Error for MergeError {}

impl From<MergeError> for LeadRankError {
    fn from(e: MergeError) -> Self {
        Self::Merge(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors raised while serialising scored leads for download.
#[derive(Debug)]
pub enum ExportError {
    /// Export requested before any scoring run has completed.
    /// User-actionable warning, not a crash.
    NoScoredLeads,

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// Spreadsheet serialisation error.
    Xlsx { reason: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoScoredLeads => {
                write!(f, "no scored leads to export — score leads first")
            }
            Self::Csv { source } => write!(f, "CSV serialisation failed: {source}"),
            Self::Xlsx { reason } => {
                write!(f, "spreadsheet serialisation failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LeadRankError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// No scoring endpoint was supplied by config or CLI.
    MissingEndpoint,

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::MissingEndpoint => write!(
                f,
                "no scoring endpoint configured. Set [scoring] endpoint in config.toml \
                 or pass --endpoint"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LeadRankError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LeadRank results.
pub type Result<T> = std::result::Result<T, LeadRankError>;
