// LeadRank - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. One scoring run: ingest → clean → score → merge → filter → export

use clap::{Parser, ValueEnum};
use leadrank::app::ingest;
use leadrank::app::pipeline;
use leadrank::app::scoring::ScoringClient;
use leadrank::app::session::Session;
use leadrank::core::export::ExportFormat;
use leadrank::core::filter;
use leadrank::core::model::LeadCategory;
use leadrank::platform::config::{self, PlatformPaths};
use leadrank::util::constants;
use leadrank::util::error::{ConfigError, LeadRankError};
use leadrank::util::logging;
use std::path::PathBuf;
use std::time::Duration;

/// Score a lead file against a remote scoring service, then rank,
/// filter, and export the results.
#[derive(Debug, Parser)]
#[command(name = "leadrank", version, about)]
struct Cli {
    /// Lead file to score (.xlsx, .xls, or .csv).
    input: PathBuf,

    /// Scoring service endpoint URL (overrides [scoring] endpoint in config).
    #[arg(long)]
    endpoint: Option<String>,

    /// Per-request wait bound in seconds (overrides [scoring] timeout_secs).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Show only rows whose cells contain this text (case-insensitive).
    #[arg(long)]
    query: Option<String>,

    /// Export format.
    #[arg(long, value_enum, default_value = "csv")]
    format: FormatArg,

    /// Export file path (defaults to the format's fixed file name).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), LeadRankError> {
    let paths = PlatformPaths::resolve();
    let config = config::load(&paths.config_file())?;
    logging::init(cli.debug, config.log_level.as_deref());

    let endpoint = cli
        .endpoint
        .or(config.endpoint)
        .ok_or(ConfigError::MissingEndpoint)?;
    let timeout = match cli.timeout_secs {
        Some(secs) => {
            if !(constants::MIN_SCORING_TIMEOUT_SECS..=constants::MAX_SCORING_TIMEOUT_SECS)
                .contains(&secs)
            {
                return Err(ConfigError::ValueOutOfRange {
                    field: "--timeout-secs".to_string(),
                    value: secs.to_string(),
                    expected: format!(
                        "{}..={}",
                        constants::MIN_SCORING_TIMEOUT_SECS,
                        constants::MAX_SCORING_TIMEOUT_SECS
                    ),
                }
                .into());
            }
            Duration::from_secs(secs)
        }
        None => config.timeout,
    };

    let raw = ingest::load_dataset(&cli.input)?;
    println!(
        "Loaded {} rows \u{2022} {} columns",
        raw.row_count(),
        raw.column_count()
    );

    let client = ScoringClient::new(endpoint, timeout);
    let mut session = Session::new();
    let report = pipeline::run(&raw, &client, &mut session)?;

    println!(
        "Scored {} leads ({} dropped by cleaning)",
        report.scored_rows, report.dropped_rows
    );
    match report.summary.top_mean {
        Some(mean) => println!("Top-{} avg score: {mean:.2}", constants::TOP_RANK_WINDOW),
        None => println!("Top-{} avg score: n/a", constants::TOP_RANK_WINDOW),
    }
    for category in LeadCategory::all() {
        println!("  {category}: {}", report.summary.count(*category));
    }

    if let (Some(query), Some(scored)) = (cli.query.as_deref(), session.scored()) {
        let indices = filter::matching_indices(scored, query);
        println!(
            "Query '{query}' matched {} of {} rows",
            indices.len(),
            scored.row_count()
        );
    }

    let download = session.export(cli.format.into())?;
    let output = cli.output.unwrap_or_else(|| match &config.output_dir {
        Some(dir) => dir.join(download.file_name),
        None => PathBuf::from(download.file_name),
    });
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| LeadRankError::Io {
                path: parent.to_path_buf(),
                operation: "create export directory",
                source,
            })?;
        }
    }
    std::fs::write(&output, &download.bytes).map_err(|source| LeadRankError::Io {
        path: output.clone(),
        operation: "write export",
        source,
    })?;
    println!(
        "Wrote {} ({} bytes, {})",
        output.display(),
        download.bytes.len(),
        download.mime_type
    );

    Ok(())
}
