// LeadRank - platform/config.rs
//
// Platform-specific configuration: config directory resolution and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform path for LeadRank configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/leadrank/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve the platform-appropriate config directory.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[scoring]` section.
    pub scoring: ScoringSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[scoring]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Scoring service endpoint URL.
    pub endpoint: Option<String>,
    /// Total wait bound per scoring request, in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory for export files when no --output path is given.
    pub output_dir: Option<PathBuf>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: Option<String>,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scoring endpoint from config, if set. CLI --endpoint overrides.
    pub endpoint: Option<String>,

    /// Total wait bound per scoring request.
    pub timeout: Duration,

    /// Directory for export files, if configured.
    pub output_dir: Option<PathBuf>,

    /// Log level from config, if set.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: Duration::from_secs(constants::DEFAULT_SCORING_TIMEOUT_SECS),
            output_dir: None,
            log_level: None,
        }
    }
}

/// Load and validate config.toml from `path`.
///
/// A missing file yields the defaults (first run needs no setup); a
/// malformed file or an out-of-range value is an error the user must
/// fix, not a silent fallback.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate(raw)
}

/// Range-check raw values and build the typed config.
fn validate(raw: RawConfig) -> Result<Config, ConfigError> {
    let timeout_secs = raw
        .scoring
        .timeout_secs
        .unwrap_or(constants::DEFAULT_SCORING_TIMEOUT_SECS);
    if !(constants::MIN_SCORING_TIMEOUT_SECS..=constants::MAX_SCORING_TIMEOUT_SECS)
        .contains(&timeout_secs)
    {
        return Err(ConfigError::ValueOutOfRange {
            field: "scoring.timeout_secs".to_string(),
            value: timeout_secs.to_string(),
            expected: format!(
                "{}..={}",
                constants::MIN_SCORING_TIMEOUT_SECS,
                constants::MAX_SCORING_TIMEOUT_SECS
            ),
        });
    }

    Ok(Config {
        endpoint: raw.scoring.endpoint,
        timeout: Duration::from_secs(timeout_secs),
        output_dir: raw.export.output_dir,
        log_level: raw.logging.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_lives_in_the_config_dir() {
        let paths = PlatformPaths::resolve();
        let file = paths.config_file();
        assert_eq!(file.parent(), Some(paths.config_dir.as_path()));
        assert_eq!(
            file.file_name().and_then(|n| n.to_str()),
            Some(constants::CONFIG_FILE_NAME)
        );
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[scoring]\nendpoint = \"https://scores.example.com/predict\"\ntimeout_secs = 10\n\
             \n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://scores.example.com/predict")
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            load(&path),
            Err(ConfigError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring\nendpoint = ").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[future_section]\nsetting = 1\n").unwrap();
        assert!(load(&path).is_ok());
    }
}
